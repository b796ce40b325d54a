//! Status transition tables. Leave requests, exit requests and onboarding
//! records all check moves through [`Progression`].

use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    str::FromStr,
};
use utoipa::ToSchema;

use crate::error::LeaveError;
use crate::types::text_enum_sql;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::Approved,
        RequestStatus::Rejected,
        RequestStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
            RequestStatus::Cancelled => "cancelled",
        }
    }
}

/// A closed status enum with a static successor table.
pub trait Progression: Copy + PartialEq + Display + 'static {
    /// Statuses reachable in one step; empty for terminal statuses.
    fn successors(self) -> &'static [Self];

    fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }

    fn transition(self, next: Self) -> Result<Self, LeaveError> {
        if self.successors().contains(&next) {
            Ok(next)
        } else {
            Err(LeaveError::invalid_transition(self, next))
        }
    }
}

impl Progression for RequestStatus {
    fn successors(self) -> &'static [Self] {
        match self {
            RequestStatus::Pending => &[
                RequestStatus::Approved,
                RequestStatus::Rejected,
                RequestStatus::Cancelled,
            ],
            RequestStatus::Approved | RequestStatus::Rejected | RequestStatus::Cancelled => &[],
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid request status: {}", s))
    }
}

text_enum_sql!(RequestStatus);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_has_successors() {
        assert_eq!(RequestStatus::Pending.successors().len(), 3);
        for status in [
            RequestStatus::Approved,
            RequestStatus::Rejected,
            RequestStatus::Cancelled,
        ] {
            assert!(status.is_terminal(), "{} should be terminal", status);
        }
    }

    #[test]
    fn cancelling_an_approved_request_is_rejected() {
        let err = RequestStatus::Approved
            .transition(RequestStatus::Cancelled)
            .expect_err("approved is terminal");
        assert_eq!(err, LeaveError::invalid_transition("approved", "cancelled"));
    }

    #[test]
    fn approving_a_rejected_request_is_rejected() {
        assert!(RequestStatus::Rejected
            .transition(RequestStatus::Approved)
            .is_err());
    }

    #[test]
    fn pending_cannot_transition_to_itself() {
        assert!(RequestStatus::Pending
            .transition(RequestStatus::Pending)
            .is_err());
    }

    #[test]
    fn status_serde_snake_case() {
        let rs: RequestStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(rs, RequestStatus::Rejected);
        assert_eq!(
            serde_json::to_value(RequestStatus::Cancelled).unwrap(),
            serde_json::json!("cancelled")
        );
        assert_eq!("APPROVED".parse::<RequestStatus>(), Ok(RequestStatus::Approved));
    }
}
