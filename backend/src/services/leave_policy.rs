//! Accept/reject decision for a leave submission, made before any balance
//! is touched.

use chrono::NaiveDate;

use crate::error::LeaveError;
use crate::models::{leave_category::LeaveCategory, leave_policy::LeavePolicy};
use crate::services::working_days::DateRange;
use crate::types::LeaveDays;

/// Everything the validator looks at besides the range itself.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionContext<'a> {
    pub policy: &'a LeavePolicy,
    pub category: &'a LeaveCategory,
    /// `None` when the employee has no balance row for the year.
    pub remaining: Option<LeaveDays>,
    /// Today in the tenant's time zone.
    pub today: NaiveDate,
}

/// Runs the checks in order and reports the first failure.
pub fn evaluate_request(
    range: &DateRange,
    chargeable: LeaveDays,
    ctx: &SubmissionContext<'_>,
) -> Result<(), LeaveError> {
    if !ctx.category.active {
        return Err(LeaveError::PolicyViolation(format!(
            "leave category `{}` is not active",
            ctx.category.code
        )));
    }

    if !chargeable.is_positive() {
        return Err(LeaveError::InvalidRange(
            "no working days in range".to_string(),
        ));
    }

    check_date_window(range.start(), ctx.policy, ctx.today)?;
    check_consecutive_cap(chargeable, ctx.policy)?;
    check_balance(chargeable, ctx)?;

    Ok(())
}

fn check_date_window(start: NaiveDate, policy: &LeavePolicy, today: NaiveDate) -> Result<(), LeaveError> {
    if start < today {
        if !policy.allow_past_dates {
            return Err(LeaveError::PolicyViolation(format!(
                "start date {} is in the past",
                start
            )));
        }
        return Ok(());
    }

    if start > today && !policy.allow_future_dates {
        return Err(LeaveError::PolicyViolation(
            "future-dated requests are not allowed".to_string(),
        ));
    }

    if policy.allow_future_dates && policy.enforce_notice && policy.min_notice_days > 0 {
        let notice = (start - today).num_days();
        if notice < i64::from(policy.min_notice_days) {
            return Err(LeaveError::PolicyViolation(format!(
                "at least {} day(s) notice required, got {}",
                policy.min_notice_days, notice
            )));
        }
    }

    Ok(())
}

fn check_consecutive_cap(chargeable: LeaveDays, policy: &LeavePolicy) -> Result<(), LeaveError> {
    if let Some(max) = policy.max_consecutive_days {
        if chargeable > LeaveDays::from_days(max) {
            return Err(LeaveError::PolicyViolation(format!(
                "{} day(s) exceeds the limit of {} consecutive day(s)",
                chargeable, max
            )));
        }
    }
    Ok(())
}

fn check_balance(chargeable: LeaveDays, ctx: &SubmissionContext<'_>) -> Result<(), LeaveError> {
    if !ctx.category.is_bounded() {
        return Ok(());
    }
    let remaining = ctx.remaining.unwrap_or(LeaveDays::ZERO);
    if chargeable > remaining {
        return Err(LeaveError::InsufficientBalance {
            requested: chargeable,
            remaining,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TenantId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn notice_policy(days: i32) -> LeavePolicy {
        LeavePolicy {
            min_notice_days: days,
            enforce_notice: true,
            ..LeavePolicy::default_for(TenantId::new())
        }
    }

    fn annual() -> LeaveCategory {
        LeaveCategory::new(TenantId::new(), "annual".into(), "Annual".into(), 20, false)
    }

    fn evaluate(
        policy: &LeavePolicy,
        category: &LeaveCategory,
        remaining: Option<LeaveDays>,
        start: NaiveDate,
        chargeable: LeaveDays,
    ) -> Result<(), LeaveError> {
        let ctx = SubmissionContext {
            policy,
            category,
            remaining,
            today: date(2025, 6, 1),
        };
        evaluate_request(&DateRange::single(start), chargeable, &ctx)
    }

    #[test]
    fn three_day_notice_rejects_next_day_and_accepts_fourth_day() {
        let policy = notice_policy(3);
        let category = annual();
        let balance = Some(LeaveDays::from_days(10));

        let err = evaluate(&policy, &category, balance, date(2025, 6, 2), LeaveDays::from_days(1))
            .unwrap_err();
        assert!(matches!(err, LeaveError::PolicyViolation(_)));

        assert!(evaluate(&policy, &category, balance, date(2025, 6, 5), LeaveDays::from_days(1)).is_ok());
    }

    #[test]
    fn zero_notice_accepts_any_future_date() {
        let policy = notice_policy(0);
        let result = evaluate(
            &policy,
            &annual(),
            Some(LeaveDays::from_days(1)),
            date(2025, 6, 2),
            LeaveDays::from_days(1),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn notice_is_ignored_when_not_enforced() {
        let policy = LeavePolicy {
            enforce_notice: false,
            ..notice_policy(10)
        };
        let result = evaluate(
            &policy,
            &annual(),
            Some(LeaveDays::from_days(5)),
            date(2025, 6, 2),
            LeaveDays::from_days(1),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn zero_chargeable_days_is_invalid_range_first() {
        let policy = notice_policy(3);
        let err = evaluate(&policy, &annual(), None, date(2025, 6, 2), LeaveDays::ZERO).unwrap_err();
        assert_eq!(err, LeaveError::InvalidRange("no working days in range".into()));
    }

    #[test]
    fn past_dates_follow_policy_flag() {
        let mut policy = LeavePolicy::default_for(TenantId::new());
        let balance = Some(LeaveDays::from_days(5));
        let past = date(2025, 5, 20);

        assert!(matches!(
            evaluate(&policy, &annual(), balance, past, LeaveDays::from_days(1)),
            Err(LeaveError::PolicyViolation(_))
        ));

        policy.allow_past_dates = true;
        policy.enforce_notice = true;
        policy.min_notice_days = 5;
        assert!(evaluate(&policy, &annual(), balance, past, LeaveDays::from_days(1)).is_ok());
    }

    #[test]
    fn future_dates_can_be_disabled() {
        let policy = LeavePolicy {
            allow_future_dates: false,
            ..LeavePolicy::default_for(TenantId::new())
        };
        let balance = Some(LeaveDays::from_days(5));
        assert!(matches!(
            evaluate(&policy, &annual(), balance, date(2025, 6, 9), LeaveDays::from_days(1)),
            Err(LeaveError::PolicyViolation(_))
        ));
        assert!(evaluate(&policy, &annual(), balance, date(2025, 6, 1), LeaveDays::from_days(1)).is_ok());
    }

    #[test]
    fn consecutive_cap_applies_before_balance() {
        let policy = LeavePolicy {
            max_consecutive_days: Some(5),
            ..LeavePolicy::default_for(TenantId::new())
        };
        let err = evaluate(&policy, &annual(), None, date(2025, 6, 9), LeaveDays::from_days(6))
            .unwrap_err();
        assert!(matches!(err, LeaveError::PolicyViolation(_)));

        let ok_len = evaluate(
            &policy,
            &annual(),
            Some(LeaveDays::from_days(5)),
            date(2025, 6, 9),
            LeaveDays::from_days(5),
        );
        assert!(ok_len.is_ok());
    }

    #[test]
    fn bounded_category_needs_enough_balance() {
        let policy = LeavePolicy::default_for(TenantId::new());
        let err = evaluate(
            &policy,
            &annual(),
            Some(LeaveDays::from_days(2)),
            date(2025, 6, 9),
            LeaveDays::from_half_days(5),
        )
        .unwrap_err();
        assert_eq!(
            err,
            LeaveError::InsufficientBalance {
                requested: LeaveDays::from_half_days(5),
                remaining: LeaveDays::from_days(2),
            }
        );

        let missing_row = evaluate(&policy, &annual(), None, date(2025, 6, 9), LeaveDays::HALF);
        assert!(matches!(missing_row, Err(LeaveError::InsufficientBalance { .. })));
    }

    #[test]
    fn unlimited_category_skips_balance_check() {
        let policy = LeavePolicy::default_for(TenantId::new());
        let unpaid = LeaveCategory::new(TenantId::new(), "unpaid".into(), "Unpaid".into(), 0, true);
        assert!(evaluate(&policy, &unpaid, None, date(2025, 6, 9), LeaveDays::from_days(15)).is_ok());
    }

    #[test]
    fn zero_allocation_bounded_category_rejects_everything() {
        let policy = LeavePolicy::default_for(TenantId::new());
        let none_allowed =
            LeaveCategory::new(TenantId::new(), "study".into(), "Study".into(), 0, false);
        assert!(matches!(
            evaluate(
                &policy,
                &none_allowed,
                Some(LeaveDays::ZERO),
                date(2025, 6, 9),
                LeaveDays::HALF
            ),
            Err(LeaveError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn inactive_category_is_a_policy_violation() {
        let policy = LeavePolicy::default_for(TenantId::new());
        let mut category = annual();
        category.active = false;
        assert!(matches!(
            evaluate(&policy, &category, None, date(2025, 6, 9), LeaveDays::ZERO),
            Err(LeaveError::PolicyViolation(_))
        ));
    }
}
