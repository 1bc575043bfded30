use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

/// Parse an IANA timezone name
pub fn parse_timezone(timezone: &str) -> Result<Tz, CoreError> {
    Tz::from_str(timezone.trim()).map_err(|_| {
        CoreError::InvalidTimezone(format!(
            "'{}'. Use IANA timezone names like 'America/New_York'",
            timezone
        ))
    })
}

/// Detect the system timezone, falling back to UTC
pub fn detect_system_timezone() -> Tz {
    if let Ok(tz) = std::env::var("TZ") {
        if let Ok(tz) = parse_timezone(&tz) {
            return tz;
        }
    }

    if let Ok(tz) = iana_time_zone::get_timezone() {
        if let Ok(tz) = parse_timezone(&tz) {
            return tz;
        }
    }

    Tz::UTC
}

/// Calendar date of `datetime` as seen in `tz`
pub fn local_date(datetime: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    datetime.with_timezone(tz).date_naive()
}
