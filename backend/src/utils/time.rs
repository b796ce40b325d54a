use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Returns the current time in the given timezone.
pub fn now_in_timezone(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

/// Returns today's date as seen from the given timezone.
pub fn today_local(tz: &Tz) -> NaiveDate {
    now_in_timezone(tz).date_naive()
}

/// Resolves a tenant's stored zone name, falling back to the configured zone
/// when the stored value is not a known IANA name.
pub fn resolve_zone(name: &str, fallback: Tz) -> Tz {
    match name.parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(time_zone = %name, fallback = %fallback, "unknown tenant time zone");
            fallback
        }
    }
}
