//! Normalization from raw source records to [`CanonicalItem`].
//!
//! Field lookup is table-driven via [`FieldCandidates`]; text and URL
//! canonicalisation is delegated to [`crate::text`] and timestamp parsing to
//! [`crate::timestamp`]. A malformed record never fails: every problem is
//! recovered with a default and reported as a [`RecordIssue`].

use chrono::{DateTime, Utc};
use feedrank_core::{CanonicalItem, NormalizerConfig, RawRecord};

use crate::error::RecordIssue;
use crate::fields::{first_number, first_present, first_text, to_count};
use crate::text::{clean_text, extract_domain, normalize_url};
use crate::timestamp::{age_hours, parse_timestamp};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_SOURCE: &str = "Unknown";
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Normalizes every record of a batch, in order.
///
/// The output always has exactly one item per input record. Recovered
/// problems are logged at `debug` with the record's index.
#[must_use]
pub fn normalize_batch(
    records: &[RawRecord],
    config: &NormalizerConfig,
    now: DateTime<Utc>,
) -> Vec<CanonicalItem> {
    let mut degraded = 0_usize;

    let items: Vec<CanonicalItem> = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let (item, issues) = normalize_record_with_issues(record, config, now);
            if !issues.is_empty() {
                degraded += 1;
                for issue in &issues {
                    tracing::debug!(index, issue = %issue, "record normalized with defaults");
                }
            }
            item
        })
        .collect();

    tracing::debug!(count = items.len(), degraded, "normalized batch");

    items
}

/// Normalizes a single raw record.
#[must_use]
pub fn normalize_record(
    record: &RawRecord,
    config: &NormalizerConfig,
    now: DateTime<Utc>,
) -> CanonicalItem {
    normalize_record_with_issues(record, config, now).0
}

/// Normalizes a single raw record, also returning every default that had
/// to be substituted.
#[must_use]
pub fn normalize_record_with_issues(
    record: &RawRecord,
    config: &NormalizerConfig,
    now: DateTime<Utc>,
) -> (CanonicalItem, Vec<RecordIssue>) {
    let fields = &config.fields;
    let mut issues = Vec::new();

    let title = first_text(record, &fields.title)
        .map(|t| clean_text(&t, config.max_title_len))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let source = first_text(record, &fields.source)
        .map(|s| clean_text(&s, usize::MAX))
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

    let summary = first_text(record, &fields.summary)
        .map(|s| clean_text(&s, config.max_summary_len))
        .unwrap_or_default();

    let url = first_text(record, &fields.url)
        .map(|u| normalize_url(&u))
        .unwrap_or_default();

    let domain = match extract_domain(&url) {
        Some(domain) => domain,
        None => {
            if !url.is_empty() {
                issues.push(RecordIssue::UnparsableUrl { url: url.clone() });
            }
            UNKNOWN_DOMAIN.to_string()
        }
    };

    let timestamp = match first_present(record, &fields.timestamp) {
        Some(raw) => parse_timestamp(raw).unwrap_or_else(|| {
            issues.push(RecordIssue::UnparsableTimestamp {
                value: raw.to_string(),
            });
            now
        }),
        None => {
            issues.push(RecordIssue::MissingTimestamp);
            now
        }
    };

    let id = first_text(record, &fields.id).map(|id| id.trim().to_string());

    let item = CanonicalItem {
        title,
        url,
        source,
        timestamp,
        summary,
        score: first_number(record, &fields.score).unwrap_or(0.0),
        comments: first_number(record, &fields.comments).map_or(0, to_count),
        domain,
        age_hours: age_hours(now, timestamp),
        id,
        upvotes: first_number(record, &fields.upvotes).map_or(0, to_count),
        downvotes: first_number(record, &fields.downvotes).map_or(0, to_count),
        duplicate_count: None,
    };

    (item, issues)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
