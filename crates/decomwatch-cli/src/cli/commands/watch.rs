//! `--watch`: poll at a fixed interval and redraw until Ctrl-C.
//!
//! Polls never overlap: each fetch finishes before the next tick is awaited.
//! A failed poll is reported and the loop keeps going. One Ctrl-C listener
//! lives for the whole loop, so an interrupt during a fetch stops it too.

use anyhow::Result;
use chrono::Utc;
use decomwatch_core::report::Report;
use decomwatch_core::source::SnapshotSource;
use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use super::{fetch_snapshots, write_report};
use crate::cli::OutputFormat;

/// ANSI: clear screen and move the cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn redraw<W: Write>(out: &mut W, report: &Report, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Text {
        write!(out, "{CLEAR_SCREEN}")?;
    }
    write_report(out, report, format)
}

pub async fn run_watch(
    source: Arc<dyn SnapshotSource>,
    format: OutputFormat,
    interval: Duration,
) -> Result<()> {
    let interrupted = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("cannot listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };
    let polls = watch_until(source, format, interval, &mut io::stdout(), interrupted).await?;
    tracing::info!(polls, "watch stopped");
    Ok(())
}

/// Poll and redraw into `out` until `shutdown` resolves. Returns the number
/// of polls started.
pub(crate) async fn watch_until<W, S>(
    source: Arc<dyn SnapshotSource>,
    format: OutputFormat,
    interval: Duration,
    out: &mut W,
    shutdown: S,
) -> Result<u64>
where
    W: Write,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut polls = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = &mut shutdown => {
                tracing::info!(polls, "watch interrupted");
                break;
            }
        }

        polls += 1;
        let fetched = tokio::select! {
            res = fetch_snapshots(&source) => res,
            _ = &mut shutdown => {
                tracing::info!(poll = polls, "watch interrupted during poll");
                break;
            }
        };

        match fetched {
            Ok(snapshots) => {
                let report = Report::assemble(&snapshots, Utc::now());
                tracing::debug!(poll = polls, draining = report.pools().len(), "redraw");
                redraw(out, &report, format)?;
            }
            Err(err) => {
                tracing::warn!(poll = polls, "poll failed: {:#}", err);
                eprintln!("decomwatch: poll failed: {:#}", err);
            }
        }
    }

    Ok(polls)
}
