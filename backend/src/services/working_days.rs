//! Working-day arithmetic for leave requests.
//!
//! Everything here is pure: the caller supplies the holiday calendar and the
//! weekend convention, and the same inputs always give the same answer.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::LeaveError;
use crate::models::leave_policy::{LeavePolicy, WeekendConvention};
use crate::services::holiday::HolidaySet;
use crate::types::LeaveDays;

/// An inclusive, validated date range (`start <= end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LeaveError> {
        if end < start {
            return Err(LeaveError::InvalidRange(format!(
                "end date {} is before start date {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// Number of calendar days, both ends included.
    pub fn len_days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.len_days() as usize)
    }

    /// The leave year the range belongs to; ranges crossing a year boundary
    /// have to be split by the requester.
    pub fn leave_year(&self) -> Result<i32, LeaveError> {
        if self.start.year() != self.end.year() {
            return Err(LeaveError::InvalidRange(format!(
                "range {}..{} crosses into another leave year",
                self.start, self.end
            )));
        }
        Ok(self.start.year())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    Working,
    Weekend,
    Holiday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub kind: DayKind,
}

/// Holidays win over weekends so a holiday on a Saturday reports as `Holiday`.
pub fn classify_day(date: NaiveDate, holidays: &HolidaySet, weekend: &WeekendConvention) -> DayKind {
    if holidays.contains(date) {
        DayKind::Holiday
    } else if weekend.is_weekend(date) {
        DayKind::Weekend
    } else {
        DayKind::Working
    }
}

pub fn count_working_days(
    range: &DateRange,
    holidays: &HolidaySet,
    weekend: &WeekendConvention,
) -> u32 {
    range
        .days()
        .filter(|date| classify_day(*date, holidays, weekend) == DayKind::Working)
        .count() as u32
}

pub fn breakdown(
    range: &DateRange,
    holidays: &HolidaySet,
    weekend: &WeekendConvention,
) -> Vec<DayEntry> {
    range
        .days()
        .map(|date| DayEntry {
            date,
            kind: classify_day(date, holidays, weekend),
        })
        .collect()
}

/// Days a request would draw from the balance.
///
/// A half-day request must cover exactly one date and needs the policy to
/// allow half days; it charges half a day when that date is a working day.
pub fn chargeable_days(
    range: &DateRange,
    half_day: bool,
    policy: &LeavePolicy,
    holidays: &HolidaySet,
) -> Result<LeaveDays, LeaveError> {
    if !half_day {
        let working = count_working_days(range, holidays, &policy.weekend);
        return Ok(LeaveDays::from_days(working as i32));
    }

    if !policy.half_day_allowed {
        return Err(LeaveError::PolicyViolation(
            "half-day leave is not allowed".to_string(),
        ));
    }
    if !range.is_single_day() {
        return Err(LeaveError::InvalidRange(
            "a half-day request must start and end on the same date".to_string(),
        ));
    }

    match classify_day(range.start(), holidays, &policy.weekend) {
        DayKind::Working => Ok(LeaveDays::HALF),
        DayKind::Weekend | DayKind::Holiday => Ok(LeaveDays::ZERO),
    }
}
