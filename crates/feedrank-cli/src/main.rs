mod io;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use feedrank_core::{AppConfig, PipelineConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "feedrank")]
#[command(about = "Normalize, deduplicate and rank aggregated content items")]
struct Cli {
    /// Pipeline config YAML. Takes precedence over `FEEDRANK_PIPELINE_CONFIG`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reference instant for item ages, as RFC 3339. Defaults to the current time.
    ///
    /// Only `normalize` and `run` compute ages; `dedup` and `rank` use the
    /// `ageHours` already stored on each item.
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,

    /// Pretty-print the JSON output.
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Map raw source records onto canonical items.
    Normalize {
        /// JSON array of raw records. Reads stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Collapse canonical items that refer to the same content.
    Dedup {
        /// JSON array of canonical items. Reads stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Score and order canonical items with the configured strategy.
    Rank {
        /// JSON array of canonical items. Reads stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Normalize, deduplicate and rank raw records in one pass.
    Run {
        /// JSON array of raw records. Reads stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

impl Commands {
    /// Whether the command computes item ages, and so reads `--now`.
    fn uses_now(&self) -> bool {
        matches!(self, Commands::Normalize { .. } | Commands::Run { .. })
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let app_config = feedrank_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(app_config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    run(cli, &app_config)
}

fn run(cli: Cli, app_config: &AppConfig) -> anyhow::Result<()> {
    let config = resolve_pipeline_config(cli.config.as_deref(), app_config)?;
    let pretty = cli.pretty || app_config.pretty_json;
    if cli.now.is_some() && !cli.command.uses_now() {
        tracing::warn!("--now has no effect here; items keep their stored ageHours");
    }
    let now = cli.now.unwrap_or_else(Utc::now);
    let stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Normalize { input } => {
            let records = io::parse_records(&io::read_input(input.as_deref())?)?;
            let items = feedrank_pipeline::normalize_batch(&records, &config.normalize, now);
            io::write_json(stdout, &items, pretty)
        }
        Commands::Dedup { input } => {
            let items = io::parse_items(&io::read_input(input.as_deref())?)?;
            let unique = feedrank_pipeline::deduplicate(items, &config.dedup);
            io::write_json(stdout, &unique, pretty)
        }
        Commands::Rank { input } => {
            let items = io::parse_items(&io::read_input(input.as_deref())?)?;
            let ranked = feedrank_pipeline::rank(items, &config.rank);
            io::write_json(stdout, &ranked, pretty)
        }
        Commands::Run { input } => {
            let records = io::parse_records(&io::read_input(input.as_deref())?)?;
            let ranked = feedrank_pipeline::run_pipeline(&records, &config, now);
            io::write_json(stdout, &ranked, pretty)
        }
    }
}

/// Pick the pipeline config file (flag first, then environment), load it,
/// and apply the `FEEDRANK_TOP_N` override.
fn resolve_pipeline_config(
    flag: Option<&Path>,
    app_config: &AppConfig,
) -> anyhow::Result<PipelineConfig> {
    let path = flag.or(app_config.pipeline_config_path.as_deref());
    let mut config = match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading pipeline config");
            feedrank_core::load_pipeline_config(path)?
        }
        None => PipelineConfig::default(),
    };

    if let Some(top_n) = app_config.top_n_override {
        config.rank.set_top_n(Some(top_n));
    }

    Ok(config)
}
