use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::request_status::RequestStatus;
use crate::types::{EmployeeId, LeaveCategoryId, LeaveDays, LeaveRequestId, TenantId};
use crate::validation::rules::validate_not_blank;

/// A leave request. `chargeable` is fixed when the request is created and is
/// never recomputed, so later holiday edits do not change it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaveRequest {
    pub id: LeaveRequestId,
    pub tenant_id: TenantId,
    pub employee_id: EmployeeId,
    pub category_id: LeaveCategoryId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub half_day: bool,
    #[sqlx(rename = "chargeable_half_days")]
    #[schema(value_type = f64)]
    pub chargeable: LeaveDays,
    pub reason: Option<String>,
    pub status: RequestStatus,
    pub decided_by: Option<EmployeeId>,
    pub decided_at: Option<DateTime<Utc>>,
    pub decision_comment: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeaveRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: TenantId,
        employee_id: EmployeeId,
        category_id: LeaveCategoryId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        half_day: bool,
        chargeable: LeaveDays,
        reason: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: LeaveRequestId::new(),
            tenant_id,
            employee_id,
            category_id,
            start_date,
            end_date,
            half_day,
            chargeable,
            reason,
            status: RequestStatus::Pending,
            decided_by: None,
            decided_at: None,
            decision_comment: None,
            cancelled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, RequestStatus::Pending)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitLeavePayload {
    pub category_id: LeaveCategoryId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub half_day: bool,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ApprovePayload {
    #[serde(default)]
    #[validate(length(max = 500))]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RejectPayload {
    #[validate(length(min = 1, max = 500), custom(function = "validate_not_blank"))]
    pub comment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_starts_pending() {
        let day = NaiveDate::from_ymd_opt(2025, 7, 7).unwrap();
        let request = LeaveRequest::new(
            TenantId::new(),
            EmployeeId::new(),
            LeaveCategoryId::new(),
            day,
            day,
            true,
            LeaveDays::HALF,
            None,
        );
        assert!(request.is_pending());
        assert!(request.decided_by.is_none());
        assert_eq!(
            serde_json::to_value(&request).unwrap()["chargeable"],
            serde_json::json!(0.5)
        );
    }

    #[test]
    fn reject_payload_requires_comment() {
        let payload = RejectPayload {
            comment: "   ".into(),
        };
        assert!(payload.validate().is_err());
        let payload = RejectPayload {
            comment: "Team offsite that week".into(),
        };
        assert!(payload.validate().is_ok());
    }
}
