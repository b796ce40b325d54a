//! Forward-only status tracking for exit and onboarding records.
//!
//! Each status enum owns a static successor table; every mutation goes through
//! [`Progression::transition`] before the store's compare-and-swap update.

use crate::models::{exit_request::ExitStatus, onboarding::OnboardingStatus};

pub use crate::models::request_status::Progression;

impl Progression for ExitStatus {
    fn successors(self) -> &'static [Self] {
        use ExitStatus::*;
        match self {
            PendingManager => &[ManagerApproved, Rejected, Withdrawn],
            ManagerApproved => &[HrProcessing, Withdrawn],
            HrProcessing => &[ClearancePending],
            ClearancePending => &[ClearanceCompleted],
            ClearanceCompleted => &[Completed],
            Completed | Rejected | Withdrawn => &[],
        }
    }
}

impl Progression for OnboardingStatus {
    fn successors(self) -> &'static [Self] {
        use OnboardingStatus::*;
        match self {
            Pending => &[DocumentsSubmitted, Cancelled],
            DocumentsSubmitted => &[HrVerified, Cancelled],
            HrVerified => &[Completed],
            Completed | Cancelled => &[],
        }
    }
}

/// Who is allowed to move an exit request into `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitActor {
    /// The employee the exit request belongs to.
    Owner,
    Approver,
}

/// Withdrawal belongs to the departing employee; every other step belongs to
/// an approver.
pub fn exit_step_allowed(next: ExitStatus, actor: ExitActor) -> bool {
    match next {
        ExitStatus::Withdrawn => actor == ExitActor::Owner,
        _ => actor == ExitActor::Approver,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LeaveError;
    use crate::models::request_status::RequestStatus;

    #[test]
    fn exit_happy_path_walks_forward() {
        let path = [
            ExitStatus::PendingManager,
            ExitStatus::ManagerApproved,
            ExitStatus::HrProcessing,
            ExitStatus::ClearancePending,
            ExitStatus::ClearanceCompleted,
            ExitStatus::Completed,
        ];
        for pair in path.windows(2) {
            assert_eq!(pair[0].transition(pair[1]), Ok(pair[1]));
        }
        assert!(ExitStatus::Completed.is_terminal());
    }

    #[test]
    fn exit_cannot_skip_or_go_back() {
        assert!(ExitStatus::PendingManager
            .transition(ExitStatus::HrProcessing)
            .is_err());
        assert!(ExitStatus::HrProcessing
            .transition(ExitStatus::ManagerApproved)
            .is_err());
        let err = ExitStatus::HrProcessing
            .transition(ExitStatus::Withdrawn)
            .unwrap_err();
        assert_eq!(
            err,
            LeaveError::invalid_transition("hr_processing", "withdrawn")
        );
    }

    #[test]
    fn exit_escapes_only_at_early_stages() {
        assert!(ExitStatus::PendingManager.transition(ExitStatus::Rejected).is_ok());
        assert!(ExitStatus::ManagerApproved.transition(ExitStatus::Withdrawn).is_ok());
        assert!(ExitStatus::ManagerApproved.transition(ExitStatus::Rejected).is_err());
        assert!(ExitStatus::Rejected.is_terminal());
        assert!(ExitStatus::Withdrawn.is_terminal());
    }

    #[test]
    fn onboarding_table() {
        assert!(OnboardingStatus::Pending
            .transition(OnboardingStatus::DocumentsSubmitted)
            .is_ok());
        assert!(OnboardingStatus::DocumentsSubmitted
            .transition(OnboardingStatus::Cancelled)
            .is_ok());
        assert!(OnboardingStatus::HrVerified
            .transition(OnboardingStatus::Cancelled)
            .is_err());
        assert!(OnboardingStatus::Pending
            .transition(OnboardingStatus::Completed)
            .is_err());
        assert!(OnboardingStatus::Cancelled.is_terminal());
    }

    #[test]
    fn withdrawal_is_owner_only() {
        assert!(exit_step_allowed(ExitStatus::Withdrawn, ExitActor::Owner));
        assert!(!exit_step_allowed(ExitStatus::Withdrawn, ExitActor::Approver));
        assert!(exit_step_allowed(ExitStatus::ManagerApproved, ExitActor::Approver));
        assert!(!exit_step_allowed(ExitStatus::ManagerApproved, ExitActor::Owner));
    }

    fn terminal_statuses_refuse_every_move<S: Progression>(all: &[S]) -> usize {
        let terminal: Vec<S> = all.iter().copied().filter(|s| s.is_terminal()).collect();
        for from in &terminal {
            for to in all {
                assert!(from.transition(*to).is_err(), "{} -> {} allowed", from, to);
            }
        }
        terminal.len()
    }

    #[test]
    fn all_status_tables_share_the_transition_check() {
        assert_eq!(terminal_statuses_refuse_every_move(&RequestStatus::ALL), 3);
        assert_eq!(terminal_statuses_refuse_every_move(&ExitStatus::ALL), 3);
        assert_eq!(terminal_statuses_refuse_every_move(&OnboardingStatus::ALL), 2);
        assert_eq!(
            RequestStatus::Approved.transition(RequestStatus::Cancelled),
            Err(LeaveError::invalid_transition("approved", "cancelled"))
        );
    }
}
