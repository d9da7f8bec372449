//! FILENAME: core/table/src/date.rs
//! PURPOSE: Recognizes date-like group keys so axes can be ordered in time.
//! CONTEXT: Group columns are often years ("2021") or ISO dates. Keys are
//! strings by the time they reach the axis, so parsing is purely textual.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y"];

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parses a group key as a point in time, in milliseconds since the epoch (UTC).
///
/// Accepted forms: a bare 4-digit year, `YYYY-MM`, `YYYY-MM-DD`,
/// `YYYY-MM-DD HH:MM[:SS]`, RFC 3339 timestamps, `DD.MM.YYYY` and
/// `MM/DD/YYYY`. Anything else returns `None`.
pub fn parse_date_key(key: &str) -> Option<i64> {
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    if key.len() == 4 && key.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = key.parse().ok()?;
        return date_millis(NaiveDate::from_ymd_opt(year, 1, 1)?);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(key) {
        return Some(dt.timestamp_millis());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(key, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(key, format) {
            return date_millis(date);
        }
    }

    // Year-month ("2021-03")
    if key.len() == 7 && key.as_bytes()[4] == b'-' {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", key), "%Y-%m-%d") {
            return date_millis(date);
        }
    }

    None
}

fn date_millis(date: NaiveDate) -> Option<i64> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}
