//! Onboarding records for new joiners.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use utoipa::ToSchema;
use validator::Validate;

use crate::types::{text_enum_sql, EmployeeId, OnboardingId, TenantId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    #[default]
    Pending,
    DocumentsSubmitted,
    HrVerified,
    Completed,
    Cancelled,
}

impl OnboardingStatus {
    pub const ALL: [OnboardingStatus; 5] = [
        OnboardingStatus::Pending,
        OnboardingStatus::DocumentsSubmitted,
        OnboardingStatus::HrVerified,
        OnboardingStatus::Completed,
        OnboardingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingStatus::Pending => "pending",
            OnboardingStatus::DocumentsSubmitted => "documents_submitted",
            OnboardingStatus::HrVerified => "hr_verified",
            OnboardingStatus::Completed => "completed",
            OnboardingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OnboardingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnboardingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OnboardingStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid onboarding status: {}", s))
    }
}

text_enum_sql!(OnboardingStatus);

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OnboardingRecord {
    pub id: OnboardingId,
    pub tenant_id: TenantId,
    pub employee_id: EmployeeId,
    pub start_date: NaiveDate,
    pub status: OnboardingStatus,
    pub notes: Option<String>,
    pub updated_by: Option<EmployeeId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OnboardingRecord {
    pub fn new(
        tenant_id: TenantId,
        employee_id: EmployeeId,
        start_date: NaiveDate,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: OnboardingId::new(),
            tenant_id,
            employee_id,
            start_date,
            status: OnboardingStatus::Pending,
            notes,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOnboardingPayload {
    pub employee_id: EmployeeId,
    pub start_date: NaiveDate,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOnboardingStatusPayload {
    pub status: OnboardingStatus,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}
