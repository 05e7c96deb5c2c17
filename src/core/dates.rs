//! Date parsing shared by the date filters and the comparator.
//!
//! Backends hand dates over as RFC 3339 strings, naive date-times or bare
//! `YYYY-MM-DD` dates. Bare dates and naive date-times are read as UTC.

use super::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a date string, or `None` if it matches none of the accepted formats.
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse an upper bound. A bare date stands for the whole day, so it resolves
/// to 23:59:59.999 of that day.
pub fn parse_end_bound(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?;
        return Some(date.and_time(end_of_day).and_utc());
    }
    parse_date(trimmed)
}

/// Epoch milliseconds of a field value. Numbers are taken as epoch millis
/// only when `numeric_is_epoch` is set (the field name reads like a date).
pub fn value_to_millis(value: &Value, numeric_is_epoch: bool) -> Option<i64> {
    match value {
        Value::Text(s) => parse_date(s).map(|dt| dt.timestamp_millis()),
        Value::Integer(i) if numeric_is_epoch => Some(*i),
        Value::Float(f) if numeric_is_epoch && f.is_finite() => Some(*f as i64),
        _ => None,
    }
}
