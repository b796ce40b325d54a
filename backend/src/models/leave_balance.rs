//! Remaining leave per employee, category and year.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::types::{EmployeeId, LeaveBalanceId, LeaveCategoryId, LeaveDays, TenantId};
use crate::validation::rules::validate_not_blank;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaveBalance {
    pub id: LeaveBalanceId,
    pub tenant_id: TenantId,
    pub employee_id: EmployeeId,
    pub category_id: LeaveCategoryId,
    pub year: i32,
    #[sqlx(rename = "allocated_half_days")]
    #[schema(value_type = f64)]
    pub allocated: LeaveDays,
    #[sqlx(rename = "carried_forward_half_days")]
    #[schema(value_type = f64)]
    pub carried_forward: LeaveDays,
    #[sqlx(rename = "remaining_half_days")]
    #[schema(value_type = f64)]
    pub remaining: LeaveDays,
    /// Bumped on every mutation; writers compare-and-swap on it.
    pub version: i32,
    pub updated_at: DateTime<Utc>,
}

impl LeaveBalance {
    /// Upper bound for `remaining`.
    pub fn ceiling(&self) -> LeaveDays {
        self.allocated + self.carried_forward
    }

    /// Whether `remaining` would stay within `0 ..= ceiling` after applying `delta`.
    pub fn accepts_delta(&self, delta: LeaveDays) -> bool {
        let next = self.remaining + delta;
        !next.is_negative() && next <= self.ceiling()
    }
}

/// Opening position of a balance for a new leave year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearOpening {
    pub allocated: LeaveDays,
    pub carried_forward: LeaveDays,
    pub remaining: LeaveDays,
}

impl YearOpening {
    /// Carries over at most `carry_cap` of the previous year's remainder.
    pub fn compute(
        allocation: LeaveDays,
        previous_remaining: Option<LeaveDays>,
        carry_cap: LeaveDays,
    ) -> Self {
        let leftover = previous_remaining
            .filter(|days| days.is_positive())
            .unwrap_or(LeaveDays::ZERO);
        let carried_forward = leftover.min(carry_cap.max(LeaveDays::ZERO));
        Self {
            allocated: allocation,
            carried_forward,
            remaining: allocation + carried_forward,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OpenYearPayload {
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OpenYearResponse {
    pub year: i32,
    pub created: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AdjustBalancePayload {
    /// Signed day amount; positive credits, negative debits.
    #[schema(value_type = f64)]
    pub delta: LeaveDays,
    #[validate(length(max = 500), custom(function = "validate_not_blank"))]
    pub reason: String,
}
