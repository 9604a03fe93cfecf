//! Report assembly: evaluate every pool, keep the draining ones, render text.
//!
//! This is the only place the "no pools are draining" policy lives. Pools are
//! evaluated independently and kept in the order the cluster returned them.

mod render;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::progress::{self, DecommissionView};
use crate::snapshot::PoolDecommissionSnapshot;

pub use render::NO_DRAINING_POOLS;

/// One draining pool and its classified view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolReport {
    /// Pool number as displayed (zero-based id + 1).
    pub pool: u64,
    pub command_line: String,
    #[serde(flatten)]
    pub view: DecommissionView,
}

/// Everything needed to print one poll's output.
///
/// Only [`Report::assemble`] builds one, so `pools` never holds a pool that
/// is not draining.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    generated_at: DateTime<Utc>,
    pools: Vec<PoolReport>,
}

impl Report {
    /// Evaluate each snapshot against `now`, dropping pools that are not draining.
    pub fn assemble<'a, I>(snapshots: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a PoolDecommissionSnapshot>,
    {
        let pools = snapshots
            .into_iter()
            .filter_map(|snap| {
                let view = progress::evaluate(snap, now);
                if !view.is_draining() {
                    tracing::debug!(pool = snap.display_id(), ?view, "skipping pool");
                    return None;
                }
                Some(PoolReport {
                    pool: snap.display_id(),
                    command_line: snap.command_line.clone(),
                    view,
                })
            })
            .collect();
        Report {
            generated_at: now,
            pools,
        }
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Draining pools, in the order the cluster listed them.
    pub fn pools(&self) -> &[PoolReport] {
        &self.pools
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
