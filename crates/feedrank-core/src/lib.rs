//! Shared data model and configuration for the feedrank pipeline.
//!
//! Holds the canonical item schema every source is normalized into, the
//! per-stage pipeline configuration (loadable from YAML), and the
//! environment-driven application config used by the CLI.

pub mod app_config;
pub mod config;
pub mod items;
pub mod pipeline_config;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use items::{CanonicalItem, ItemField, RankedItem, RawRecord, Scores};
pub use pipeline_config::{
    load_pipeline_config, parse_pipeline_config, BayesianConfig, DedupConfig, DedupKeyStrategy,
    EngagementThresholds, FieldCandidates, KeywordConfig, KeywordTiers, MultiFactorConfig,
    NormalizerConfig, PipelineConfig, RankConfig, RecencyThresholds, Resolution, TimeDecayConfig,
    Weights,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read pipeline config {path}: {source}")]
    PipelineFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pipeline config: {0}")]
    PipelineFileParse(#[from] serde_yaml::Error),

    #[error("pipeline config validation failed: {0}")]
    Validation(String),
}
