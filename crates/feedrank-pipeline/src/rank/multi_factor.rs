//! Weighted combination of keyword relevance, recency and engagement.

use feedrank_core::{
    CanonicalItem, EngagementThresholds, KeywordTiers, MultiFactorConfig, RankedItem,
    RecencyThresholds, Scores, Weights,
};

use super::{contains_keyword, sort_and_truncate};

const HIGH_TIER_POINTS: u32 = 3;
const MEDIUM_TIER_POINTS: u32 = 2;
const LOW_TIER_POINTS: u32 = 1;

/// Score, sort and truncate items by the weighted multi-factor formula.
#[must_use]
pub fn rank_multi_factor(
    items: Vec<CanonicalItem>,
    config: &MultiFactorConfig,
) -> Vec<RankedItem> {
    let weight_sum = config.weights.sum();
    if (weight_sum - 1.0).abs() > 1e-9 {
        tracing::debug!(
            sum = weight_sum,
            "ranking weights do not sum to 1.0; applying them as given"
        );
    }

    let ranked = items
        .into_iter()
        .map(|item| {
            let relevance = relevance_score(&item, &config.keywords);
            let recency = recency_score(item.age_hours, &config.recency_hours);
            let engagement = engagement_score(item.score, &config.engagement);
            RankedItem {
                item,
                scores: Scores::MultiFactor {
                    relevance_score: relevance,
                    recency_score: recency,
                    engagement_score: engagement,
                    final_score: final_score(relevance, recency, engagement, &config.weights),
                },
            }
        })
        .collect();

    sort_and_truncate(ranked, config.top_n)
}

/// Sum of tier points for every keyword found in the title and summary.
///
/// Each keyword counts once no matter how often it appears; there is no cap.
#[must_use]
pub fn relevance_score(item: &CanonicalItem, tiers: &KeywordTiers) -> u32 {
    let text = item.searchable_text().to_lowercase();
    let tier_points = |keywords: &[String], points: u32| -> u32 {
        keywords
            .iter()
            .filter(|keyword| contains_keyword(&text, keyword))
            .map(|_| points)
            .sum()
    };

    tier_points(&tiers.high, HIGH_TIER_POINTS)
        + tier_points(&tiers.medium, MEDIUM_TIER_POINTS)
        + tier_points(&tiers.low, LOW_TIER_POINTS)
}

/// 3, 2 or 1 for items younger than each threshold; 0 otherwise.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn recency_score(age_hours: i64, thresholds: &RecencyThresholds) -> u8 {
    let age = age_hours as f64;
    let under = |limit: Option<f64>| limit.is_some_and(|limit| age < limit);

    if under(thresholds.very_recent) {
        3
    } else if under(thresholds.recent) {
        2
    } else if under(thresholds.moderate) {
        1
    } else {
        0
    }
}

/// 3, 2 or 1 for raw scores above each threshold; 0 otherwise.
#[must_use]
pub fn engagement_score(score: f64, thresholds: &EngagementThresholds) -> u8 {
    let over = |limit: Option<f64>| limit.is_some_and(|limit| score > limit);

    if over(thresholds.high) {
        3
    } else if over(thresholds.medium) {
        2
    } else if over(thresholds.low) {
        1
    } else {
        0
    }
}

#[must_use]
pub fn final_score(relevance: u32, recency: u8, engagement: u8, weights: &Weights) -> f64 {
    f64::from(relevance) * weights.relevance
        + f64::from(recency) * weights.recency
        + f64::from(engagement) * weights.engagement
}
