//! Per-stage pipeline configuration.
//!
//! Every section and key is optional. A missing section takes the defaults
//! below; a section that is present but omits a weight, keyword tier, or
//! threshold leaves that factor at zero. Unknown keys are ignored.

use std::path::Path;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::items::ItemField;
use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub normalize: NormalizerConfig,
    pub dedup: DedupConfig,
    pub rank: RankConfig,
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub fields: FieldCandidates,
    pub max_title_len: usize,
    pub max_summary_len: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            fields: FieldCandidates::default(),
            max_title_len: 200,
            max_summary_len: 500,
        }
    }
}

/// Ordered source-field names tried for each canonical field. The first
/// present value wins. Dotted names (`source.name`) walk nested objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldCandidates {
    pub title: Vec<String>,
    pub url: Vec<String>,
    pub source: Vec<String>,
    pub timestamp: Vec<String>,
    pub summary: Vec<String>,
    pub score: Vec<String>,
    pub comments: Vec<String>,
    pub id: Vec<String>,
    pub upvotes: Vec<String>,
    pub downvotes: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl Default for FieldCandidates {
    /// Covers the Hacker News, NewsAPI, RSS and Reddit item shapes.
    fn default() -> Self {
        Self {
            title: names(&["title", "headline"]),
            url: names(&["url", "link"]),
            source: names(&["source", "source.name", "sourceName", "creator"]),
            timestamp: names(&[
                "timestamp",
                "pubDate",
                "publishedAt",
                "created_at",
                "time",
                "created_utc",
            ]),
            summary: names(&["summary", "description", "excerpt", "contentSnippet"]),
            score: names(&["score", "points", "ups"]),
            comments: names(&["comments", "descendants", "numComments", "num_comments"]),
            id: names(&["id", "guid", "objectID"]),
            upvotes: names(&["upvotes", "ups"]),
            downvotes: names(&["downvotes", "downs"]),
        }
    }
}

// ---------------------------------------------------------------------------
// Deduplicator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    pub key: DedupKeyStrategy,
    pub resolution: Resolution,
    pub with_duplicate_count: bool,
}

/// How the equivalence key of an item is derived.
///
/// Deserializes from a map tagged by `strategy`; a missing tag selects
/// `normalized-url`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum DedupKeyStrategy {
    #[default]
    NormalizedUrl,
    NormalizedTitle,
    RawId,
    Composite { fields: Vec<ItemField> },
}

const DEDUP_KEY_STRATEGIES: &[&str] =
    &["normalized-url", "normalized-title", "raw-id", "composite"];

impl<'de> Deserialize<'de> for DedupKeyStrategy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct CompositeFields {
            fields: Vec<ItemField>,
        }

        let (strategy, rest) = split_strategy(deserializer)?;
        match strategy.as_deref().unwrap_or("normalized-url") {
            "normalized-url" => Ok(DedupKeyStrategy::NormalizedUrl),
            "normalized-title" => Ok(DedupKeyStrategy::NormalizedTitle),
            "raw-id" => Ok(DedupKeyStrategy::RawId),
            "composite" => CompositeFields::deserialize(rest)
                .map(|c| DedupKeyStrategy::Composite { fields: c.fields })
                .map_err(de::Error::custom),
            other => Err(de::Error::unknown_variant(other, DEDUP_KEY_STRATEGIES)),
        }
    }
}

/// Which member of a duplicate group survives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resolution {
    #[default]
    FirstWins,
    HighestScoreWins,
}

// ---------------------------------------------------------------------------
// Ranker
// ---------------------------------------------------------------------------

/// Exactly one ranking strategy, selected by the `strategy` tag.
///
/// A section without a tag selects `multi-factor`; the remaining keys are
/// that strategy's settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum RankConfig {
    MultiFactor(MultiFactorConfig),
    TimeDecay(TimeDecayConfig),
    Bayesian(BayesianConfig),
    Keyword(KeywordConfig),
}

const RANK_STRATEGIES: &[&str] = &["multi-factor", "time-decay", "bayesian", "keyword"];

impl<'de> Deserialize<'de> for RankConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (strategy, rest) = split_strategy(deserializer)?;
        let config = match strategy.as_deref().unwrap_or("multi-factor") {
            "multi-factor" => MultiFactorConfig::deserialize(rest).map(RankConfig::MultiFactor),
            "time-decay" => TimeDecayConfig::deserialize(rest).map(RankConfig::TimeDecay),
            "bayesian" => BayesianConfig::deserialize(rest).map(RankConfig::Bayesian),
            "keyword" => KeywordConfig::deserialize(rest).map(RankConfig::Keyword),
            other => return Err(de::Error::unknown_variant(other, RANK_STRATEGIES)),
        };
        config.map_err(de::Error::custom)
    }
}

/// Read a strategy-tagged section, returning the tag (if any) and the
/// remaining keys. A null section is an empty one.
fn split_strategy<'de, D>(deserializer: D) -> Result<(Option<String>, Value), D::Error>
where
    D: Deserializer<'de>,
{
    let mut map = Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    let strategy = match map.remove("strategy") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(name),
        Some(other) => {
            return Err(de::Error::custom(format!(
                "strategy must be a string, got {other}"
            )));
        }
    };
    Ok((strategy, Value::Object(map)))
}

impl Default for RankConfig {
    fn default() -> Self {
        RankConfig::MultiFactor(MultiFactorConfig::default())
    }
}

impl RankConfig {
    /// Truncation limit of whichever strategy is selected.
    #[must_use]
    pub fn top_n(&self) -> Option<usize> {
        match self {
            RankConfig::MultiFactor(c) => c.top_n,
            RankConfig::TimeDecay(c) => c.top_n,
            RankConfig::Bayesian(c) => c.top_n,
            RankConfig::Keyword(c) => c.top_n,
        }
    }

    pub fn set_top_n(&mut self, top_n: Option<usize>) {
        match self {
            RankConfig::MultiFactor(c) => c.top_n = top_n,
            RankConfig::TimeDecay(c) => c.top_n = top_n,
            RankConfig::Bayesian(c) => c.top_n = top_n,
            RankConfig::Keyword(c) => c.top_n = top_n,
        }
    }

    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        match self {
            RankConfig::MultiFactor(_) => "multi-factor",
            RankConfig::TimeDecay(_) => "time-decay",
            RankConfig::Bayesian(_) => "bayesian",
            RankConfig::Keyword(_) => "keyword",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiFactorConfig {
    pub keywords: KeywordTiers,
    pub weights: Weights,
    pub recency_hours: RecencyThresholds,
    pub engagement: EngagementThresholds,
    /// `None` disables truncation.
    pub top_n: Option<usize>,
}

impl Default for MultiFactorConfig {
    fn default() -> Self {
        Self {
            keywords: KeywordTiers::default(),
            weights: Weights::default(),
            recency_hours: RecencyThresholds::default(),
            engagement: EngagementThresholds::default(),
            top_n: Some(10),
        }
    }
}

/// Keyword lists worth 3, 2 and 1 relevance points per hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTiers {
    #[serde(default)]
    pub high: Vec<String>,
    #[serde(default)]
    pub medium: Vec<String>,
    #[serde(default)]
    pub low: Vec<String>,
}

impl Default for KeywordTiers {
    fn default() -> Self {
        Self {
            high: names(&["ai", "automation", "machine learning", "n8n", "workflow"]),
            medium: names(&["technology", "innovation", "digital", "api", "integration"]),
            low: names(&["software", "development", "programming", "data"]),
        }
    }
}

/// Factor weights. Conventionally they sum to 1.0; nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    #[serde(default)]
    pub relevance: f64,
    #[serde(default)]
    pub recency: f64,
    #[serde(default)]
    pub engagement: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            relevance: 0.5,
            recency: 0.3,
            engagement: 0.2,
        }
    }
}

impl Weights {
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.relevance + self.recency + self.engagement
    }
}

/// Age limits in hours: younger than `very_recent` scores 3, `recent` 2,
/// `moderate` 1. A missing limit never matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecencyThresholds {
    #[serde(default)]
    pub very_recent: Option<f64>,
    #[serde(default)]
    pub recent: Option<f64>,
    #[serde(default)]
    pub moderate: Option<f64>,
}

impl Default for RecencyThresholds {
    fn default() -> Self {
        Self {
            very_recent: Some(6.0),
            recent: Some(24.0),
            moderate: Some(48.0),
        }
    }
}

/// Raw-score limits: above `high` scores 3, `medium` 2, `low` 1.
/// A missing limit never matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngagementThresholds {
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub medium: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
}

impl Default for EngagementThresholds {
    fn default() -> Self {
        Self {
            high: Some(100.0),
            medium: Some(50.0),
            low: Some(20.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeDecayConfig {
    /// Hours after which a score has decayed to half.
    pub half_life: f64,
    pub top_n: Option<usize>,
}

impl Default for TimeDecayConfig {
    fn default() -> Self {
        Self {
            half_life: 24.0,
            top_n: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BayesianConfig {
    /// Normal quantile of the confidence level; 1.96 is 95%.
    pub z: f64,
    pub top_n: Option<usize>,
}

impl Default for BayesianConfig {
    fn default() -> Self {
        Self { z: 1.96, top_n: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    pub keywords: Vec<String>,
    pub top_n: Option<usize>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            keywords: names(&["ai", "automation", "workflow", "n8n"]),
            top_n: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load and validate a pipeline configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_pipeline_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PipelineFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_pipeline_config(&content)
}

/// Parse and validate a pipeline configuration from YAML text.
///
/// An empty document yields the default configuration.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_pipeline_config(content: &str) -> Result<PipelineConfig, ConfigError> {
    if content.trim().is_empty() {
        return Ok(PipelineConfig::default());
    }

    let config: PipelineConfig = serde_yaml::from_str(content)?;
    validate_pipeline_config(&config)?;
    Ok(config)
}

fn validate_pipeline_config(config: &PipelineConfig) -> Result<(), ConfigError> {
    if let DedupKeyStrategy::Composite { fields } = &config.dedup.key {
        if fields.is_empty() {
            return Err(ConfigError::Validation(
                "composite dedup key requires at least one field".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "pipeline_config_test.rs"]
mod tests;
