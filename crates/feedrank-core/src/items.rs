use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One record in a source's native schema. No keys are guaranteed.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// A content item normalized to the fixed field set shared by every source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalItem {
    pub title: String,
    /// Lower-cased, scheme-less URL without `www.` or trailing slash,
    /// e.g. `"example.com/a"`.
    pub url: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub summary: String,
    pub score: f64,
    pub comments: u64,
    /// Host of `url` without `www.`, or `"unknown"`.
    pub domain: String,
    /// Whole hours between the batch's captured "now" and `timestamp`.
    /// Negative for timestamps in the future.
    pub age_hours: i64,
    /// Identifier assigned by the originating source, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub upvotes: u64,
    #[serde(default)]
    pub downvotes: u64,
    /// Size of the duplicate group this item won. Only set when the
    /// deduplicator is asked to annotate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_count: Option<usize>,
}

impl CanonicalItem {
    /// Text searched by keyword-based rankers: title and summary joined by a space.
    #[must_use]
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.summary)
    }

    /// Returns the value of a named field as text, for composite keys.
    #[must_use]
    pub fn field_text(&self, field: ItemField) -> String {
        match field {
            ItemField::Title => self.title.clone(),
            ItemField::Url => self.url.clone(),
            ItemField::Source => self.source.clone(),
            ItemField::Summary => self.summary.clone(),
            ItemField::Domain => self.domain.clone(),
            ItemField::Id => self.id.clone().unwrap_or_default(),
            ItemField::Timestamp => self.timestamp.to_rfc3339(),
        }
    }
}

/// Canonical fields that can participate in a composite dedup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemField {
    Title,
    Url,
    Source,
    Summary,
    Domain,
    Id,
    Timestamp,
}

impl std::fmt::Display for ItemField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemField::Title => write!(f, "title"),
            ItemField::Url => write!(f, "url"),
            ItemField::Source => write!(f, "source"),
            ItemField::Summary => write!(f, "summary"),
            ItemField::Domain => write!(f, "domain"),
            ItemField::Id => write!(f, "id"),
            ItemField::Timestamp => write!(f, "timestamp"),
        }
    }
}

/// Score fields attached by one ranking strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scores {
    #[serde(rename_all = "camelCase")]
    MultiFactor {
        relevance_score: u32,
        recency_score: u8,
        engagement_score: u8,
        final_score: f64,
    },
    #[serde(rename_all = "camelCase")]
    TimeDecay { decayed_score: f64 },
    #[serde(rename_all = "camelCase")]
    Bayesian { bayesian_score: f64 },
    #[serde(rename_all = "camelCase")]
    Keyword { keyword_score: u32 },
}

impl Scores {
    /// The value the ranker sorts on.
    #[must_use]
    pub fn sort_key(&self) -> f64 {
        match self {
            Scores::MultiFactor { final_score, .. } => *final_score,
            Scores::TimeDecay { decayed_score } => *decayed_score,
            Scores::Bayesian { bayesian_score } => *bayesian_score,
            Scores::Keyword { keyword_score } => f64::from(*keyword_score),
        }
    }
}

/// A [`CanonicalItem`] extended with the scores of the strategy that ranked it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem {
    #[serde(flatten)]
    pub item: CanonicalItem,
    #[serde(flatten)]
    pub scores: Scores,
}

impl RankedItem {
    #[must_use]
    pub fn sort_key(&self) -> f64 {
        self.scores.sort_key()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn make_item() -> CanonicalItem {
        CanonicalItem {
            title: "Show HN: My Project".to_string(),
            url: "example.com".to_string(),
            source: "Hacker News".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            summary: "Show HN: My Project".to_string(),
            score: 150.0,
            comments: 42,
            domain: "example.com".to_string(),
            age_hours: 3,
            id: None,
            upvotes: 0,
            downvotes: 0,
            duplicate_count: None,
        }
    }

    #[test]
    fn canonical_item_serializes_camel_case() {
        let json = serde_json::to_value(make_item()).unwrap();
        assert_eq!(json["ageHours"], 3);
        assert_eq!(json["timestamp"], "2024-01-01T00:00:00Z");
        assert!(json.get("duplicateCount").is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn canonical_item_deserializes_without_optional_fields() {
        let json = serde_json::json!({
            "title": "t",
            "url": "example.com/a",
            "source": "RSS Feed",
            "timestamp": "2024-01-01T00:00:00.000Z",
            "summary": "",
            "score": 0,
            "comments": 0,
            "domain": "example.com",
            "ageHours": -2
        });
        let item: CanonicalItem = serde_json::from_value(json).unwrap();
        assert_eq!(item.age_hours, -2);
        assert_eq!(item.upvotes, 0);
        assert!(item.duplicate_count.is_none());
    }

    #[test]
    fn ranked_item_flattens_scores() {
        let ranked = RankedItem {
            item: make_item(),
            scores: Scores::MultiFactor {
                relevance_score: 6,
                recency_score: 3,
                engagement_score: 3,
                final_score: 4.5,
            },
        };
        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["title"], "Show HN: My Project");
        assert_eq!(json["relevanceScore"], 6);
        assert_eq!(json["finalScore"], 4.5);
    }

    #[test]
    fn keyword_scores_sort_as_float() {
        let scores = Scores::Keyword { keyword_score: 3 };
        assert!((scores.sort_key() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn field_text_uses_empty_string_for_missing_id() {
        assert_eq!(make_item().field_text(ItemField::Id), "");
        assert_eq!(make_item().field_text(ItemField::Source), "Hacker News");
    }
}
