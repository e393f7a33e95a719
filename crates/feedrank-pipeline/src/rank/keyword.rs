//! Plain keyword-hit counting.

use feedrank_core::{CanonicalItem, KeywordConfig, RankedItem, Scores};

use super::{contains_keyword, sort_and_truncate};

/// Score, sort and optionally truncate items by keyword hits.
#[must_use]
pub fn rank_keyword(items: Vec<CanonicalItem>, config: &KeywordConfig) -> Vec<RankedItem> {
    let ranked = items
        .into_iter()
        .map(|item| {
            let hits = keyword_score(&item, &config.keywords);
            RankedItem {
                item,
                scores: Scores::Keyword { keyword_score: hits },
            }
        })
        .collect();

    sort_and_truncate(ranked, config.top_n)
}

/// Number of keywords found in the title and summary.
#[must_use]
pub fn keyword_score(item: &CanonicalItem, keywords: &[String]) -> u32 {
    let text = item.searchable_text().to_lowercase();
    let hits = keywords
        .iter()
        .filter(|keyword| contains_keyword(&text, keyword))
        .count();
    u32::try_from(hits).unwrap_or(u32::MAX)
}
