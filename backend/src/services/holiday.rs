use std::collections::BTreeSet;

use chrono::NaiveDate;
use sqlx::{PgPool, Row};

use crate::types::TenantId;

/// Source of a tenant's holiday calendar. Evaluations fetch it once per call
/// and hand the resulting [`HolidaySet`] to the pure working-day functions.
#[async_trait::async_trait]
pub trait HolidayServiceTrait: Send + Sync {
    async fn holidays_for_year(&self, tenant_id: TenantId, year: i32) -> sqlx::Result<HolidaySet>;
}

/// Reads the calendar from the `holidays` table.
#[derive(Clone)]
pub struct HolidayService {
    pool: PgPool,
}

impl HolidayService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl HolidayServiceTrait for HolidayService {
    async fn holidays_for_year(&self, tenant_id: TenantId, year: i32) -> sqlx::Result<HolidaySet> {
        let (window_start, window_end) = year_bounds(year)?;
        load_from_db(&self.pool, tenant_id, window_start, window_end).await
    }
}

async fn load_from_db(
    pool: &PgPool,
    tenant_id: TenantId,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> sqlx::Result<HolidaySet> {
    ensure_valid_window(window_start, window_end)?;

    let rows = sqlx::query(
        r#"
        SELECT holiday_date
        FROM holidays
        WHERE tenant_id = $1
          AND holiday_date >= $2
          AND holiday_date < $3
        ORDER BY holiday_date
        "#,
    )
    .bind(tenant_id)
    .bind(window_start)
    .bind(window_end)
    .fetch_all(pool)
    .await?;

    let mut holidays = HolidaySet::default();
    for row in rows {
        let date: NaiveDate = row.try_get("holiday_date")?;
        holidays.insert(date);
    }

    tracing::debug!(
        tenant_id = %tenant_id,
        %window_start,
        %window_end,
        count = holidays.len(),
        "loaded holiday calendar"
    );

    Ok(holidays)
}

/// An ordered set of holiday dates.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn insert(&mut self, date: NaiveDate) {
        self.dates.insert(date);
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        HolidaySet::new(iter)
    }
}

/// Serves a fixed calendar regardless of tenant.
pub struct HolidayServiceStub {
    holidays: HolidaySet,
}

impl HolidayServiceStub {
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: HolidaySet::new(holidays),
        }
    }
}

#[async_trait::async_trait]
impl HolidayServiceTrait for HolidayServiceStub {
    async fn holidays_for_year(&self, _tenant_id: TenantId, year: i32) -> sqlx::Result<HolidaySet> {
        let (window_start, window_end) = year_bounds(year)?;
        Ok(self
            .holidays
            .iter()
            .filter(|date| *date >= window_start && *date < window_end)
            .collect())
    }
}

fn year_bounds(year: i32) -> sqlx::Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| sqlx::Error::Protocol(format!("invalid year: {}", year)))?;
    let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)
        .ok_or_else(|| sqlx::Error::Protocol(format!("invalid year: {}", year + 1)))?;
    Ok((start, end))
}

fn ensure_valid_window(window_start: NaiveDate, window_end: NaiveDate) -> sqlx::Result<()> {
    if window_start >= window_end {
        Err(sqlx::Error::Protocol(
            "invalid calendar window: start must be before end".into(),
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn year_bounds_covers_whole_year() {
        let (start, end) = year_bounds(2025).unwrap();
        assert_eq!(start, date(2025, 1, 1));
        assert_eq!(end, date(2026, 1, 1));
    }

    #[test]
    fn ensure_valid_window_rejects_equal_dates() {
        let day = date(2024, 1, 1);
        assert!(ensure_valid_window(day, day).is_err());
        assert!(ensure_valid_window(day, date(2024, 1, 2)).is_ok());
    }

    #[tokio::test]
    async fn stub_returns_dates_inside_requested_year() {
        let stub: Arc<dyn HolidayServiceTrait> =
            Arc::new(HolidayServiceStub::new([date(2024, 12, 25), date(2025, 7, 4)]));

        let holidays = stub.holidays_for_year(TenantId::new(), 2025).await.unwrap();
        assert_eq!(holidays.iter().collect::<Vec<_>>(), vec![date(2025, 7, 4)]);
        assert!(!holidays.contains(date(2024, 12, 25)));
    }
}
