//! Wilson score lower bound over up/down votes.
//!
//! Ranks items with few votes conservatively: 1 up / 0 down does not beat
//! 95 up / 5 down.

use feedrank_core::{BayesianConfig, CanonicalItem, RankedItem, Scores};

use super::sort_and_truncate;

/// Score, sort and optionally truncate items by Wilson lower bound.
#[must_use]
pub fn rank_bayesian(items: Vec<CanonicalItem>, config: &BayesianConfig) -> Vec<RankedItem> {
    let ranked = items
        .into_iter()
        .map(|item| {
            let score = wilson_lower_bound(item.upvotes, item.downvotes, config.z);
            RankedItem {
                item,
                scores: Scores::Bayesian {
                    bayesian_score: score,
                },
            }
        })
        .collect();

    sort_and_truncate(ranked, config.top_n)
}

/// Lower bound of the Wilson score interval for `upvotes / (upvotes + downvotes)`.
///
/// Exactly `0.0` when there are no votes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn wilson_lower_bound(upvotes: u64, downvotes: u64, z: f64) -> f64 {
    let total = upvotes.saturating_add(downvotes);
    if total == 0 {
        return 0.0;
    }

    let n = total as f64;
    let phat = upvotes as f64 / n;
    let z2 = z * z;

    (phat + z2 / (2.0 * n) - z * ((phat * (1.0 - phat) + z2 / (4.0 * n)) / n).sqrt())
        / (1.0 + z2 / n)
}
