//! Pool decommission snapshots and the admin API's pools-status wire format.
//!
//! The admin endpoint returns one `PoolStatus` object per pool. Each is turned
//! into an immutable [`PoolDecommissionSnapshot`]; a malformed timestamp on one
//! pool only demotes that pool to "not started" and never fails the batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point-in-time reading of a pool's decommission counters.
///
/// Sizes are signed: counters come straight from the cluster and are not
/// guaranteed to be consistent (`total >= current >= start >= 0` is expected,
/// not enforced).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolDecommissionSnapshot {
    /// Zero-based pool index as reported by the cluster (displayed as `id + 1`).
    pub pool_id: u32,
    /// Pool layout description, display-only.
    pub command_line: String,
    /// When the decommission began; `None` means it has not started.
    pub start_time: Option<DateTime<Utc>>,
    /// Total pool capacity in bytes.
    pub total_size: i64,
    /// Free bytes at decommission start.
    pub start_size: i64,
    /// Free bytes at sampling time.
    pub current_size: i64,
    pub complete: bool,
    pub failed: bool,
    pub canceled: bool,
}

/// Why a started decommission is no longer draining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Complete,
    Failed,
    Canceled,
}

/// Lifecycle phase of a pool's decommission, derived from the raw flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecommissionPhase {
    NotStarted,
    Draining { started_at: DateTime<Utc> },
    Finished(Outcome),
}

impl PoolDecommissionSnapshot {
    /// Snapshot of a pool with no decommission recorded.
    pub fn idle(pool_id: u32, command_line: impl Into<String>) -> Self {
        Self {
            pool_id,
            command_line: command_line.into(),
            start_time: None,
            total_size: 0,
            start_size: 0,
            current_size: 0,
            complete: false,
            failed: false,
            canceled: false,
        }
    }

    /// Collapse the start time and terminal flags into a single phase.
    ///
    /// Failed wins over Canceled, which wins over Complete.
    pub fn phase(&self) -> DecommissionPhase {
        let Some(started_at) = self.start_time else {
            return DecommissionPhase::NotStarted;
        };
        if self.failed {
            DecommissionPhase::Finished(Outcome::Failed)
        } else if self.canceled {
            DecommissionPhase::Finished(Outcome::Canceled)
        } else if self.complete {
            DecommissionPhase::Finished(Outcome::Complete)
        } else {
            DecommissionPhase::Draining { started_at }
        }
    }

    /// Pool number as shown to operators.
    pub fn display_id(&self) -> u64 {
        u64::from(self.pool_id) + 1
    }
}

/// Per-pool status object returned by `GET /minio/admin/v3/pools/list`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStatus {
    pub id: u32,
    #[serde(rename = "cmdline", default)]
    pub cmd_line: String,
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(rename = "decommissionInfo", default)]
    pub decommission: Option<PoolDecommissionInfo>,
}

/// Decommission counters as they appear on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PoolDecommissionInfo {
    pub start_time: Option<String>,
    pub start_size: i64,
    pub total_size: i64,
    pub current_size: i64,
    pub complete: bool,
    pub failed: bool,
    pub canceled: bool,
    pub queued_buckets: Option<Vec<String>>,
    pub decommissioned_buckets: Option<Vec<String>>,
    pub objects_decommissioned: i64,
    #[serde(rename = "objectsDecommissionedFailed")]
    pub objects_decommission_failed: i64,
    #[serde(rename = "bytesDecommissioned")]
    pub bytes_done: i64,
    #[serde(rename = "bytesDecommissionedFailed")]
    pub bytes_failed: i64,
}

/// Parse a start timestamp, mapping the zero time and garbage to "not started".
pub fn parse_start_time(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(t) => {
            let t = t.with_timezone(&Utc);
            // Covers the Go zero time (year 1) as well as epoch-0 placeholders.
            if t.timestamp() <= 0 {
                None
            } else {
                Some(t)
            }
        }
        Err(e) => {
            tracing::debug!(raw, error = %e, "unparseable decommission start time");
            None
        }
    }
}

impl From<PoolStatus> for PoolDecommissionSnapshot {
    fn from(status: PoolStatus) -> Self {
        let Some(info) = status.decommission else {
            return PoolDecommissionSnapshot::idle(status.id, status.cmd_line);
        };
        PoolDecommissionSnapshot {
            pool_id: status.id,
            command_line: status.cmd_line,
            start_time: parse_start_time(info.start_time.as_deref()),
            total_size: info.total_size,
            start_size: info.start_size,
            current_size: info.current_size,
            complete: info.complete,
            failed: info.failed,
            canceled: info.canceled,
        }
    }
}

/// Parse the pools-status JSON array into snapshots, preserving order.
pub fn parse_pools_status(body: &[u8]) -> Result<Vec<PoolDecommissionSnapshot>, serde_json::Error> {
    let pools: Vec<PoolStatus> = serde_json::from_slice(body)?;
    tracing::debug!(pools = pools.len(), "parsed pools status");
    Ok(pools.into_iter().map(PoolDecommissionSnapshot::from).collect())
}
