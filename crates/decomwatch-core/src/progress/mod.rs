//! Decommission progress classification and ETA projection.
//!
//! [`evaluate`] is a pure function of one snapshot and an explicit `now`: it
//! never reads the clock and never fails. Divisions only happen once the
//! divisors are known to be positive, so counter anomalies degrade a pool to
//! [`DecommissionView::Starting`] instead of producing NaN or a negative ETA.
//!
//! The projection assumes a constant average rate since the decommission
//! started: `eta = now + (elapsed / progress - elapsed)`.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::snapshot::{DecommissionPhase, Outcome, PoolDecommissionSnapshot};

/// Elapsed seconds that must pass before a rate is trusted.
pub const MIN_ELAPSED_SECS: f64 = 10.0;

/// Why a pool is left out of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotDrainingReason {
    NotStarted,
    Finished(Outcome),
}

/// Projected completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Eta {
    /// Wall-clock completion estimate.
    pub at: DateTime<Utc>,
    /// Remaining time, truncated to whole seconds.
    #[serde(serialize_with = "serialize_secs")]
    pub remaining: Duration,
}

/// Numbers derived from a draining pool once enough signal has accumulated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecommissionMetrics {
    pub started_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// Bytes that had to leave the pool when the decommission started.
    pub initial_used: i64,
    /// Bytes freed since the start.
    pub bytes_freed: i64,
    /// Bytes still resident on the pool.
    pub used_now: i64,
    pub total_size: i64,
    /// `bytes_freed / initial_used`; may exceed 1.0 before the cluster flags completion.
    pub progress_fraction: f64,
    /// `used_now / total_size`, or 0 when the total is not positive.
    pub usage_fraction: f64,
    pub bytes_per_sec: f64,
    /// Present only while `0 < progress_fraction < 1`.
    pub eta: Option<Eta>,
}

/// Classified view of one pool, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DecommissionView {
    NotDraining {
        reason: NotDrainingReason,
    },
    /// Draining, but too early or too noisy to project.
    Starting {
        started_at: DateTime<Utc>,
        #[serde(serialize_with = "serialize_secs")]
        elapsed: Duration,
    },
    InProgress(DecommissionMetrics),
}

impl DecommissionView {
    pub fn is_draining(&self) -> bool {
        !matches!(self, DecommissionView::NotDraining { .. })
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        match self {
            DecommissionView::NotDraining { .. } => None,
            DecommissionView::Starting { started_at, .. } => Some(*started_at),
            DecommissionView::InProgress(m) => Some(m.started_at),
        }
    }
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_i64(d.num_seconds())
}

fn secs_f64(d: Duration) -> f64 {
    d.num_milliseconds() as f64 / 1000.0
}

/// Classify a snapshot and, when meaningful, derive progress, rate and ETA.
pub fn evaluate(snapshot: &PoolDecommissionSnapshot, now: DateTime<Utc>) -> DecommissionView {
    let started_at = match snapshot.phase() {
        DecommissionPhase::NotStarted => {
            return DecommissionView::NotDraining {
                reason: NotDrainingReason::NotStarted,
            }
        }
        DecommissionPhase::Finished(outcome) => {
            return DecommissionView::NotDraining {
                reason: NotDrainingReason::Finished(outcome),
            }
        }
        DecommissionPhase::Draining { started_at } => started_at,
    };

    let elapsed = now.signed_duration_since(started_at);
    let elapsed_secs = secs_f64(elapsed);

    let initial_used = snapshot.total_size.saturating_sub(snapshot.start_size);
    let bytes_freed = snapshot.current_size.saturating_sub(snapshot.start_size);
    let used_now = snapshot.total_size.saturating_sub(snapshot.current_size);

    if bytes_freed <= 0 || initial_used <= 0 || elapsed_secs <= MIN_ELAPSED_SECS {
        tracing::trace!(
            pool = snapshot.pool_id,
            bytes_freed,
            initial_used,
            elapsed_secs,
            "not enough signal to project"
        );
        return DecommissionView::Starting {
            started_at,
            elapsed,
        };
    }

    let progress_fraction = bytes_freed as f64 / initial_used as f64;
    let bytes_per_sec = bytes_freed as f64 / elapsed_secs;
    let usage_fraction = if snapshot.total_size > 0 {
        used_now as f64 / snapshot.total_size as f64
    } else {
        0.0
    };

    DecommissionView::InProgress(DecommissionMetrics {
        started_at,
        elapsed,
        initial_used,
        bytes_freed,
        used_now,
        total_size: snapshot.total_size,
        progress_fraction,
        usage_fraction,
        bytes_per_sec,
        eta: project_eta(progress_fraction, elapsed_secs, now),
    })
}

/// Linear projection from the average rate since start.
///
/// Returns None unless `0 < progress < 1` and the result is representable.
pub fn project_eta(progress: f64, elapsed_secs: f64, now: DateTime<Utc>) -> Option<Eta> {
    if !(progress > 0.0 && progress < 1.0) || elapsed_secs <= 0.0 {
        return None;
    }
    let remaining_secs = elapsed_secs / progress - elapsed_secs;
    if !remaining_secs.is_finite() || remaining_secs < 0.0 || remaining_secs > i64::MAX as f64 {
        return None;
    }
    let remaining = Duration::try_seconds(remaining_secs as i64)?;
    let at = now.checked_add_signed(remaining)?;
    Some(Eta { at, remaining })
}
