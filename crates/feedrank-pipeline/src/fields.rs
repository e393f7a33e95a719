//! Candidate-field resolution over schema-less records.
//!
//! Each canonical field is resolved from an ordered list of source-field
//! names; the first one holding a usable value wins.

use feedrank_core::RawRecord;
use serde_json::Value;

/// Look up a field by name, falling back to a dotted path into nested objects.
///
/// A literal key containing dots takes precedence over path traversal.
pub(crate) fn lookup<'a>(record: &'a RawRecord, name: &str) -> Option<&'a Value> {
    if let Some(value) = record.get(name) {
        return Some(value);
    }

    let mut parts = name.split('.');
    let mut current = record.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// First candidate whose value is a non-blank string or a number, as text.
///
/// Objects, arrays, booleans and nulls are skipped.
pub(crate) fn first_text(record: &RawRecord, candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|name| lookup(record, name))
        .find_map(value_as_text)
}

/// First candidate whose value is a finite number or a numeric string.
pub(crate) fn first_number(record: &RawRecord, candidates: &[String]) -> Option<f64> {
    candidates
        .iter()
        .filter_map(|name| lookup(record, name))
        .find_map(value_as_number)
}

/// First candidate holding anything other than null or a blank string.
pub(crate) fn first_present<'a>(
    record: &'a RawRecord,
    candidates: &[String],
) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|name| lookup(record, name))
        .find(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Convert a numeric metric to a non-negative whole count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn to_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}
