//! CLI command handlers.

mod status;
mod watch;

pub use status::run_status;
pub(crate) use status::{fetch_snapshots, write_report};
pub use watch::run_watch;
#[cfg(test)]
pub(crate) use watch::watch_until;
