//! Ranking strategies.
//!
//! Each strategy scores every item, sorts descending with a stable sort
//! (equal scores keep their input order), and optionally truncates.
//! Exactly one strategy runs per call, selected by [`RankConfig`].

mod bayesian;
mod decay;
mod keyword;
mod multi_factor;

use feedrank_core::{CanonicalItem, RankConfig, RankedItem};

pub use bayesian::{rank_bayesian, wilson_lower_bound};
pub use decay::{decayed_score, rank_time_decay};
pub use keyword::{keyword_score, rank_keyword};
pub use multi_factor::{
    engagement_score, final_score, rank_multi_factor, recency_score, relevance_score,
};

/// Rank items with the strategy selected in `config`.
#[must_use]
pub fn rank(items: Vec<CanonicalItem>, config: &RankConfig) -> Vec<RankedItem> {
    match config {
        RankConfig::MultiFactor(c) => rank_multi_factor(items, c),
        RankConfig::TimeDecay(c) => rank_time_decay(items, c),
        RankConfig::Bayesian(c) => rank_bayesian(items, c),
        RankConfig::Keyword(c) => rank_keyword(items, c),
    }
}

/// Stable descending sort on each item's strategy score, then truncation.
pub(crate) fn sort_and_truncate(
    mut ranked: Vec<RankedItem>,
    top_n: Option<usize>,
) -> Vec<RankedItem> {
    ranked.sort_by(|a, b| ordering_key(b.sort_key()).total_cmp(&ordering_key(a.sort_key())));
    if let Some(n) = top_n {
        ranked.truncate(n);
    }
    ranked
}

/// `total_cmp` separates -0.0 from 0.0 and places NaN above infinity;
/// fold both so equal scores stay equal and NaN sorts last.
#[allow(clippy::float_cmp)]
fn ordering_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else if score == 0.0 {
        0.0
    } else {
        score
    }
}

/// Case-insensitive substring test against already lower-cased text.
/// Blank keywords never match.
pub(crate) fn contains_keyword(text_lower: &str, keyword: &str) -> bool {
    let needle = keyword.trim().to_lowercase();
    !needle.is_empty() && text_lower.contains(&needle)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use feedrank_core::{KeywordConfig, Scores, TimeDecayConfig};

    use super::*;

    fn make_item(title: &str, score: f64) -> CanonicalItem {
        CanonicalItem {
            title: title.to_string(),
            url: "example.com".to_string(),
            source: "RSS Feed".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            summary: String::new(),
            score,
            comments: 0,
            domain: "example.com".to_string(),
            age_hours: 0,
            id: None,
            upvotes: 0,
            downvotes: 0,
            duplicate_count: None,
        }
    }

    fn ranked(title: &str, key: f64) -> RankedItem {
        RankedItem {
            item: make_item(title, 0.0),
            scores: Scores::TimeDecay { decayed_score: key },
        }
    }

    #[test]
    fn dispatches_to_selected_strategy() {
        let items = vec![make_item("ai news", 10.0)];
        let out = rank(items.clone(), &RankConfig::Keyword(KeywordConfig::default()));
        assert!(matches!(out[0].scores, Scores::Keyword { keyword_score: 1 }));

        let out = rank(items, &RankConfig::TimeDecay(TimeDecayConfig::default()));
        assert!(matches!(out[0].scores, Scores::TimeDecay { .. }));
    }

    #[test]
    fn default_config_is_multi_factor() {
        let out = rank(vec![make_item("x", 0.0)], &RankConfig::default());
        assert!(matches!(out[0].scores, Scores::MultiFactor { .. }));
    }

    #[test]
    fn sort_is_stable_for_equal_scores() {
        let input = vec![
            ranked("a", 1.0),
            ranked("b", 2.0),
            ranked("c", 1.0),
            ranked("d", 2.0),
            ranked("e", 1.0),
        ];
        let out = sort_and_truncate(input, None);
        let titles: Vec<&str> = out.iter().map(|r| r.item.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn negative_zero_ties_with_zero() {
        let input = vec![ranked("neg", -0.0), ranked("pos", 0.0)];
        let out = sort_and_truncate(input, None);
        assert_eq!(out[0].item.title, "neg");
    }

    #[test]
    fn nan_sorts_last() {
        let input = vec![ranked("nan", f64::NAN), ranked("low", -5.0)];
        let out = sort_and_truncate(input, None);
        assert_eq!(out[0].item.title, "low");
    }

    #[test]
    fn truncates_to_top_n() {
        let input = vec![ranked("a", 1.0), ranked("b", 3.0), ranked("c", 2.0)];
        let out = sort_and_truncate(input, Some(2));
        let titles: Vec<&str> = out.iter().map(|r| r.item.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "c"]);
    }

    #[test]
    fn blank_keywords_never_match() {
        assert!(!contains_keyword("anything", ""));
        assert!(!contains_keyword("anything", "   "));
        assert!(contains_keyword("machine learning rocks", "Machine Learning"));
    }
}
