//! Exponential time decay of the raw score.

use feedrank_core::{CanonicalItem, RankedItem, Scores, TimeDecayConfig};

use super::sort_and_truncate;

const DEFAULT_HALF_LIFE_HOURS: f64 = 24.0;

/// Score, sort and optionally truncate items by decayed raw score.
#[must_use]
pub fn rank_time_decay(items: Vec<CanonicalItem>, config: &TimeDecayConfig) -> Vec<RankedItem> {
    let half_life = if config.half_life.is_finite() && config.half_life > 0.0 {
        config.half_life
    } else {
        tracing::warn!(
            half_life = config.half_life,
            fallback = DEFAULT_HALF_LIFE_HOURS,
            "half-life must be a positive number of hours; using default"
        );
        DEFAULT_HALF_LIFE_HOURS
    };

    let ranked = items
        .into_iter()
        .map(|item| {
            let decayed = decayed_score(item.score, item.age_hours, half_life);
            RankedItem {
                item,
                scores: Scores::TimeDecay {
                    decayed_score: decayed,
                },
            }
        })
        .collect();

    sort_and_truncate(ranked, config.top_n)
}

/// `base · 0.5^(age / half_life)` rounded to a whole number, halves upward.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn decayed_score(base: f64, age_hours: i64, half_life: f64) -> f64 {
    (base * 0.5_f64.powf(age_hours as f64 / half_life) + 0.5).floor()
}
