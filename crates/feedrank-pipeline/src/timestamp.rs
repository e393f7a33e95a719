//! Timestamp parsing for the formats sources actually send: ISO-8601 /
//! RFC 3339 strings, RFC 2822 (`pubDate` in RSS), bare dates, and epoch
//! numbers in seconds or milliseconds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Epoch magnitudes below this are seconds; at or above, milliseconds.
pub const EPOCH_SECONDS_LIMIT: f64 = 10_000_000_000.0;

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a raw field value into a UTC instant.
#[must_use]
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => from_epoch(n.as_f64()?),
        Value::String(s) => parse_timestamp_str(s),
        _ => None,
    }
}

/// Parse a timestamp string. Naive date-times are taken as UTC.
#[must_use]
pub fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if is_epoch_literal(s) {
        return from_epoch(s.parse::<f64>().ok()?);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn is_epoch_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Interpret an epoch number, choosing seconds or milliseconds by magnitude.
#[allow(clippy::cast_possible_truncation)]
fn from_epoch(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }

    let millis = if value.abs() < EPOCH_SECONDS_LIMIT {
        value * 1000.0
    } else {
        value
    };
    DateTime::from_timestamp_millis(millis.round() as i64)
}

/// Whole hours from `timestamp` to `now`. Negative for the future.
///
/// Halves round toward positive infinity: 2.5 h is 3, -1.5 h is -1.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn age_hours(now: DateTime<Utc>, timestamp: DateTime<Utc>) -> i64 {
    let millis = (now - timestamp).num_milliseconds() as f64;
    (millis / 3_600_000.0 + 0.5).floor() as i64
}
