//! Domain failures raised by leave evaluation and workflow transitions.

use crate::types::LeaveDays;
use axum::http::StatusCode;
use thiserror::Error;

/// Recoverable, user-facing rule failures. None of them leave partial state
/// behind: the surrounding transaction is rolled back before they surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveError {
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    #[error("Insufficient balance: requested {requested} day(s), {remaining} remaining")]
    InsufficientBalance {
        requested: LeaveDays,
        remaining: LeaveDays,
    },

    #[error("Cannot move from `{from}` to `{to}`")]
    InvalidTransition { from: String, to: String },

    #[error("Concurrent update detected: {0}")]
    ConcurrencyConflict(String),
}

impl LeaveError {
    pub fn invalid_transition(from: impl ToString, to: impl ToString) -> Self {
        LeaveError::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            LeaveError::InvalidRange(_) => "INVALID_RANGE",
            LeaveError::PolicyViolation(_) => "POLICY_VIOLATION",
            LeaveError::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            LeaveError::InvalidTransition { .. } => "INVALID_TRANSITION",
            LeaveError::ConcurrencyConflict(_) => "CONCURRENCY_CONFLICT",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            LeaveError::InvalidRange(_) => StatusCode::BAD_REQUEST,
            LeaveError::PolicyViolation(_) | LeaveError::InsufficientBalance { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            LeaveError::InvalidTransition { .. } | LeaveError::ConcurrencyConflict(_) => {
                StatusCode::CONFLICT
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_balance_message_shows_day_amounts() {
        let err = LeaveError::InsufficientBalance {
            requested: LeaveDays::from_half_days(5),
            remaining: LeaveDays::from_days(2),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: requested 2.5 day(s), 2 remaining"
        );
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn transition_errors_map_to_conflict() {
        let err = LeaveError::invalid_transition("approved", "cancelled");
        assert_eq!(err.code(), "INVALID_TRANSITION");
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Cannot move from `approved` to `cancelled`");
    }
}
