use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use chrono_english::{parse_date_string, Dialect};
use chrono_tz::Tz;

/// Parses human input such as "tomorrow", "next friday 5pm" or "2024-10-03",
/// interpreted in the user's timezone.
pub fn parse_due_date(input: &str, now: DateTime<Utc>, tz: Tz) -> Result<DateTime<Utc>> {
    parse_date_string(input.trim(), now.with_timezone(&tz), Dialect::Us)
        .map(|local| local.with_timezone(&Utc))
        .map_err(|e| anyhow!("Failed to parse due date '{}': {}", input, e))
}

/// Form variant: blank input means "no due date".
pub fn parse_optional_due_date(input: &str, now: DateTime<Utc>, tz: Tz) -> Result<Option<DateTime<Utc>>> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        parse_due_date(trimmed, now, tz).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_dates() {
        let tomorrow = parse_due_date("tomorrow", now(), Tz::UTC).unwrap();
        assert_eq!(tomorrow.date_naive(), (now() + Duration::days(1)).date_naive());
    }

    #[test]
    fn test_absolute_date_in_timezone() {
        let due = parse_due_date("2024-10-03", now(), chrono_tz::Asia::Tokyo).unwrap();
        assert_eq!(
            due.with_timezone(&chrono_tz::Asia::Tokyo).date_naive(),
            chrono::NaiveDate::from_ymd_opt(2024, 10, 3).unwrap()
        );
    }

    #[test]
    fn test_blank_and_invalid_input() {
        assert_eq!(parse_optional_due_date("  ", now(), Tz::UTC).unwrap(), None);
        assert_eq!(parse_optional_due_date("None", now(), Tz::UTC).unwrap(), None);
        assert!(parse_due_date("not a date at all", now(), Tz::UTC).is_err());
    }
}
