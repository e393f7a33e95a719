use chrono::{DateTime, Utc};
use feedrank_core::{PipelineConfig, RankedItem, RawRecord};

use crate::dedup::deduplicate;
use crate::normalize::normalize_batch;
use crate::rank::rank;

/// Normalize, deduplicate and rank a batch of raw records.
///
/// `now` is captured once by the caller and used for every item's age, so
/// one batch is always scored against a single instant.
#[must_use]
pub fn run_pipeline(
    records: &[RawRecord],
    config: &PipelineConfig,
    now: DateTime<Utc>,
) -> Vec<RankedItem> {
    let normalized = normalize_batch(records, &config.normalize, now);
    let normalized_count = normalized.len();

    let unique = deduplicate(normalized, &config.dedup);
    let unique_count = unique.len();

    let ranked = rank(unique, &config.rank);

    tracing::info!(
        records = records.len(),
        normalized = normalized_count,
        unique = unique_count,
        ranked = ranked.len(),
        strategy = config.rank.strategy_name(),
        now = %now.to_rfc3339(),
        "pipeline run complete"
    );

    ranked
}
