//! One-shot status: fetch once, print the report, exit.

use anyhow::{Context, Result};
use chrono::Utc;
use decomwatch_core::report::Report;
use decomwatch_core::snapshot::PoolDecommissionSnapshot;
use decomwatch_core::source::SnapshotSource;
use std::io::{self, Write};
use std::sync::Arc;

use crate::cli::OutputFormat;

/// Run the blocking fetch off the async runtime.
pub(crate) async fn fetch_snapshots(
    source: &Arc<dyn SnapshotSource>,
) -> Result<Vec<PoolDecommissionSnapshot>> {
    let source = Arc::clone(source);
    tokio::task::spawn_blocking(move || source.fetch())
        .await
        .context("fetch task join")?
}

/// Write `report` in the requested format.
pub(crate) fn write_report<W: Write>(out: &mut W, report: &Report, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => report.render(out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

pub async fn run_status(source: Arc<dyn SnapshotSource>, format: OutputFormat) -> Result<()> {
    let snapshots = fetch_snapshots(&source).await?;
    let report = Report::assemble(&snapshots, Utc::now());
    tracing::info!(
        pools = snapshots.len(),
        draining = report.pools().len(),
        "status report"
    );
    write_report(&mut io::stdout().lock(), &report, format)
}
