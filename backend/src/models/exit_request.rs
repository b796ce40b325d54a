//! Employee exit (offboarding) requests.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use validator::Validate;

use crate::types::{text_enum_sql, EmployeeId, ExitRequestId, TenantId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExitStatus {
    #[default]
    PendingManager,
    ManagerApproved,
    HrProcessing,
    ClearancePending,
    ClearanceCompleted,
    Completed,
    Rejected,
    Withdrawn,
}

impl ExitStatus {
    pub const ALL: [ExitStatus; 8] = [
        ExitStatus::PendingManager,
        ExitStatus::ManagerApproved,
        ExitStatus::HrProcessing,
        ExitStatus::ClearancePending,
        ExitStatus::ClearanceCompleted,
        ExitStatus::Completed,
        ExitStatus::Rejected,
        ExitStatus::Withdrawn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExitStatus::PendingManager => "pending_manager",
            ExitStatus::ManagerApproved => "manager_approved",
            ExitStatus::HrProcessing => "hr_processing",
            ExitStatus::ClearancePending => "clearance_pending",
            ExitStatus::ClearanceCompleted => "clearance_completed",
            ExitStatus::Completed => "completed",
            ExitStatus::Rejected => "rejected",
            ExitStatus::Withdrawn => "withdrawn",
        }
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExitStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExitStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid exit status: {}", s))
    }
}

text_enum_sql!(ExitStatus);

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ExitRequest {
    pub id: ExitRequestId,
    pub tenant_id: TenantId,
    pub employee_id: EmployeeId,
    pub last_working_day: NaiveDate,
    pub reason: Option<String>,
    pub status: ExitStatus,
    pub updated_by: Option<EmployeeId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExitRequest {
    pub fn new(
        tenant_id: TenantId,
        employee_id: EmployeeId,
        last_working_day: NaiveDate,
        reason: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExitRequestId::new(),
            tenant_id,
            employee_id,
            last_working_day,
            reason,
            status: ExitStatus::PendingManager,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateExitPayload {
    pub last_working_day: NaiveDate,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateExitStatusPayload {
    pub status: ExitStatus,
}
