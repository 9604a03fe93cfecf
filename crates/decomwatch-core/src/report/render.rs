//! Fixed text layout for a [`Report`].

use std::fmt;
use std::io;

use super::{PoolReport, Report};
use crate::human::{
    format_bytes_i64, format_duration, format_rate, format_relative, format_timestamp,
};
use crate::progress::{DecommissionMetrics, DecommissionView};

/// Printed alone when no pool is draining.
pub const NO_DRAINING_POOLS: &str = "No pools are currently being decommissioned.";

const STARTING_PLACEHOLDER: &str = "Decommissioning is starting, ETA not yet available...";

impl Report {
    /// Write the report to `out`, one block per draining pool.
    pub fn render<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pools.is_empty() {
            return writeln!(f, "{NO_DRAINING_POOLS}");
        }
        for pool in &self.pools {
            write_pool(f, pool, self)?;
        }
        Ok(())
    }
}

fn write_pool(f: &mut fmt::Formatter<'_>, pool: &PoolReport, report: &Report) -> fmt::Result {
    // `assemble` keeps only draining pools, which always carry a start time.
    let Some(started_at) = pool.view.started_at() else {
        return Ok(());
    };
    writeln!(f, "Pool #{}: {}", pool.pool, pool.command_line)?;
    writeln!(
        f,
        "  Started: {} ({} ago)",
        format_timestamp(started_at),
        format_relative(started_at, report.generated_at())
    )?;
    match &pool.view {
        DecommissionView::InProgress(m) => write_metrics(f, m)?,
        _ => writeln!(f, "  {STARTING_PLACEHOLDER}")?,
    }
    writeln!(f)
}

fn write_metrics(f: &mut fmt::Formatter<'_>, m: &DecommissionMetrics) -> fmt::Result {
    writeln!(
        f,
        "  Progress: {} / {} freed ({:.1}%)",
        format_bytes_i64(m.bytes_freed),
        format_bytes_i64(m.initial_used),
        m.progress_fraction * 100.0
    )?;
    writeln!(
        f,
        "  Current usage: {} / {} ({:.1}%)",
        format_bytes_i64(m.used_now),
        format_bytes_i64(m.total_size),
        m.usage_fraction * 100.0
    )?;
    writeln!(f, "  Speed: {}", format_rate(m.bytes_per_sec))?;
    if let Some(eta) = &m.eta {
        writeln!(
            f,
            "  ETA: {} ({} remaining)",
            format_timestamp(eta.at),
            format_duration(eta.remaining)
        )?;
    }
    Ok(())
}
