//! CLI for decomwatch.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use decomwatch_core::admin::{AdminClient, ClientOptions};
use decomwatch_core::alias;
use decomwatch_core::config::{self, DecomwatchConfig};
use decomwatch_core::source::{FileSource, SnapshotSource};
use std::path::PathBuf;
use std::sync::Arc;

use commands::{run_status, run_watch};

/// Report progress and ETA of in-flight storage pool decommissions.
#[derive(Debug, Parser)]
#[command(name = "decomwatch")]
#[command(about = "Show progress and ETA of storage pool decommissioning", long_about = None)]
pub struct Cli {
    /// Cluster alias from the mc config (e.g. `myminio`).
    #[arg(required_unless_present = "input")]
    pub alias: Option<String>,

    /// Path to the mc config directory (default: ~/.mc).
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Re-poll and redraw at a fixed interval (10s by default) until interrupted.
    #[arg(long, short = 'w')]
    pub watch: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Read a saved pools-status JSON document instead of querying the cluster.
    #[arg(long, value_name = "FILE", conflicts_with = "alias")]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let source = cli.snapshot_source(&cfg)?;
        tracing::info!(source = %source.describe(), watch = cli.watch, "querying pool status");

        if cli.watch {
            run_watch(source, cli.format, cfg.watch_interval()).await
        } else {
            run_status(source, cli.format).await
        }
    }

    /// Build the source named on the command line: a saved document or a live alias.
    fn snapshot_source(&self, cfg: &DecomwatchConfig) -> Result<Arc<dyn SnapshotSource>> {
        if let Some(path) = &self.input {
            return Ok(Arc::new(FileSource::new(path)));
        }
        let name = self
            .alias
            .as_deref()
            .context("an alias is required unless --input is given")?;
        let config_dir = self.config_dir.as_deref().or(cfg.mc_config_dir.as_deref());
        let ac = alias::load_alias(name, config_dir)?;
        let client = AdminClient::new(&ac, ClientOptions::from(cfg))
            .with_context(|| format!("create admin client for alias {name:?}"))?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests;
