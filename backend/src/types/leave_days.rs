//! Leave amounts measured in half-day units.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};

/// A quantity of leave, stored as a count of half days.
///
/// On the wire it is a decimal number of days (`1.5`); in the database it is
/// an integer column holding half days so arithmetic stays exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct LeaveDays(i32);

impl LeaveDays {
    pub const ZERO: LeaveDays = LeaveDays(0);
    pub const HALF: LeaveDays = LeaveDays(1);

    pub fn from_half_days(half_days: i32) -> Self {
        Self(half_days)
    }

    pub fn from_days(days: i32) -> Self {
        Self(days.saturating_mul(2))
    }

    /// Parses a day count such as `2` or `0.5`; anything finer than a half day
    /// is rejected.
    pub fn try_from_f64(days: f64) -> Option<Self> {
        if !days.is_finite() {
            return None;
        }
        let halves = days * 2.0;
        if halves.fract() != 0.0 || halves.abs() > i32::MAX as f64 {
            return None;
        }
        Some(Self(halves as i32))
    }

    pub fn half_days(self) -> i32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 2.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for LeaveDays {
    type Output = LeaveDays;

    fn add(self, rhs: LeaveDays) -> LeaveDays {
        LeaveDays(self.0.saturating_add(rhs.0))
    }
}

impl Sub for LeaveDays {
    type Output = LeaveDays;

    fn sub(self, rhs: LeaveDays) -> LeaveDays {
        LeaveDays(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for LeaveDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{:.1}", self.as_f64())
        }
    }
}

impl Serialize for LeaveDays {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for LeaveDays {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = f64::deserialize(deserializer)?;
        LeaveDays::try_from_f64(raw).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "{} is not a whole or half day amount",
                raw
            ))
        })
    }
}
