//! Tenant leave policy and weekend convention.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::types::{LeaveDays, TenantId};

/// The weekdays a tenant treats as non-working.
///
/// Weekdays are indexed Sunday = 0 through Saturday = 6, the same convention
/// the `weekend_days` column uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekendConvention {
    mask: u8,
}

impl WeekendConvention {
    pub fn none() -> Self {
        Self { mask: 0 }
    }

    pub fn saturday_sunday() -> Self {
        Self::from_weekdays([Weekday::Sat, Weekday::Sun])
    }

    pub fn friday_saturday() -> Self {
        Self::from_weekdays([Weekday::Fri, Weekday::Sat])
    }

    pub fn from_weekdays(days: impl IntoIterator<Item = Weekday>) -> Self {
        let mask = days
            .into_iter()
            .fold(0u8, |mask, day| mask | (1 << day.num_days_from_sunday()));
        Self { mask }
    }

    /// Builds a convention from Sunday-based indices, rejecting values outside 0..=6.
    pub fn from_indices(indices: &[i16]) -> Result<Self, String> {
        let mut mask = 0u8;
        for &index in indices {
            if !(0..=6).contains(&index) {
                return Err(format!("weekday index {} is outside 0..=6", index));
            }
            mask |= 1 << index;
        }
        Ok(Self { mask })
    }

    pub fn indices(&self) -> Vec<i16> {
        (0..7i16).filter(|i| self.mask & (1 << i) != 0).collect()
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.mask & (1 << date.weekday().num_days_from_sunday()) != 0
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }
}

impl Default for WeekendConvention {
    fn default() -> Self {
        Self::saturday_sunday()
    }
}

impl Serialize for WeekendConvention {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.indices().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WeekendConvention {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let indices = Vec::<i16>::deserialize(deserializer)?;
        WeekendConvention::from_indices(&indices).map_err(serde::de::Error::custom)
    }
}

/// Per-tenant leave rules, read-only to the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeavePolicy {
    pub tenant_id: TenantId,
    #[schema(value_type = Vec<i16>)]
    pub weekend: WeekendConvention,
    pub min_notice_days: i32,
    pub enforce_notice: bool,
    pub allow_future_dates: bool,
    pub allow_past_dates: bool,
    /// `None` means no cap.
    pub max_consecutive_days: Option<i32>,
    pub half_day_allowed: bool,
    pub max_carry_forward_days: i32,
    pub updated_at: Option<DateTime<Utc>>,
}

impl LeavePolicy {
    /// The policy used for tenants that never saved one.
    pub fn default_for(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            weekend: WeekendConvention::saturday_sunday(),
            min_notice_days: 0,
            enforce_notice: false,
            allow_future_dates: true,
            allow_past_dates: false,
            max_consecutive_days: None,
            half_day_allowed: true,
            max_carry_forward_days: 0,
            updated_at: None,
        }
    }

    pub fn carry_forward_cap(&self) -> LeaveDays {
        LeaveDays::from_days(self.max_carry_forward_days.max(0))
    }
}

/// Raw `leave_policies` row.
#[derive(Debug, Clone, FromRow)]
pub struct LeavePolicyRow {
    pub tenant_id: TenantId,
    pub weekend_days: Vec<i16>,
    pub min_notice_days: i32,
    pub enforce_notice: bool,
    pub allow_future_dates: bool,
    pub allow_past_dates: bool,
    pub max_consecutive_days: Option<i32>,
    pub half_day_allowed: bool,
    pub max_carry_forward_days: i32,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<LeavePolicyRow> for LeavePolicy {
    type Error = anyhow::Error;

    fn try_from(row: LeavePolicyRow) -> Result<Self, Self::Error> {
        let weekend = WeekendConvention::from_indices(&row.weekend_days)
            .map_err(|e| anyhow::anyhow!("corrupt weekend_days for {}: {}", row.tenant_id, e))?;
        Ok(Self {
            tenant_id: row.tenant_id,
            weekend,
            min_notice_days: row.min_notice_days,
            enforce_notice: row.enforce_notice,
            allow_future_dates: row.allow_future_dates,
            allow_past_dates: row.allow_past_dates,
            max_consecutive_days: row.max_consecutive_days,
            half_day_allowed: row.half_day_allowed,
            max_carry_forward_days: row.max_carry_forward_days,
            updated_at: Some(row.updated_at),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateLeavePolicyPayload {
    #[schema(value_type = Vec<i16>)]
    pub weekend: WeekendConvention,
    #[validate(range(min = 0, max = 365))]
    pub min_notice_days: i32,
    pub enforce_notice: bool,
    pub allow_future_dates: bool,
    pub allow_past_dates: bool,
    #[validate(range(min = 1, max = 366))]
    pub max_consecutive_days: Option<i32>,
    pub half_day_allowed: bool,
    #[validate(range(min = 0, max = 366))]
    pub max_carry_forward_days: i32,
}

impl UpdateLeavePolicyPayload {
    pub fn into_policy(self, tenant_id: TenantId) -> LeavePolicy {
        LeavePolicy {
            tenant_id,
            weekend: self.weekend,
            min_notice_days: self.min_notice_days,
            enforce_notice: self.enforce_notice,
            allow_future_dates: self.allow_future_dates,
            allow_past_dates: self.allow_past_dates,
            max_consecutive_days: self.max_consecutive_days,
            half_day_allowed: self.half_day_allowed,
            max_carry_forward_days: self.max_carry_forward_days,
            updated_at: Some(Utc::now()),
        }
    }
}
