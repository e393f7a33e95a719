use std::path::PathBuf;

/// Process-level settings for the `feedrank` binary, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Fallback `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// YAML pipeline configuration. Built-in defaults apply when unset.
    pub pipeline_config_path: Option<PathBuf>,
    pub pretty_json: bool,
    /// Overrides the selected ranking strategy's `top_n`.
    pub top_n_override: Option<usize>,
}
