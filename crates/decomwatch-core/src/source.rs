//! Where snapshots come from: the live admin API or a saved pools-status document.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::admin::AdminClient;
use crate::snapshot::{parse_pools_status, PoolDecommissionSnapshot};

/// Produces one snapshot per pool known to the cluster.
///
/// Implementations either return a well-formed list or fail before any
/// progress computation happens.
pub trait SnapshotSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<PoolDecommissionSnapshot>>;

    /// Short human label for logs.
    fn describe(&self) -> String;
}

impl SnapshotSource for AdminClient {
    fn fetch(&self) -> Result<Vec<PoolDecommissionSnapshot>> {
        self.list_pools_status()
            .with_context(|| format!("list pools status from {}", self.describe()))
    }

    fn describe(&self) -> String {
        self.url_for("/")
    }
}

/// Reads a pools-status JSON document from disk on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotSource for FileSource {
    fn fetch(&self) -> Result<Vec<PoolDecommissionSnapshot>> {
        let data = fs::read(&self.path).with_context(|| format!("read {}", self.path.display()))?;
        parse_pools_status(&data).with_context(|| format!("parse {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_source_reads_document() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(br#"[{"id": 0, "cmdline": "pool-a"}, {"id": 1, "cmdline": "pool-b"}]"#)
            .unwrap();
        f.flush().unwrap();
        let src = FileSource::new(f.path());
        let snaps = src.fetch().unwrap();
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[1].command_line, "pool-b");
        assert_eq!(src.describe(), f.path().display().to_string());
    }

    #[test]
    fn file_source_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let src = FileSource::new(dir.path().join("missing.json"));
        let err = src.fetch().unwrap_err();
        assert!(format!("{err:#}").contains("missing.json"));
    }

    #[test]
    fn file_source_bad_json_errors() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"<html>oops</html>").unwrap();
        f.flush().unwrap();
        let err = FileSource::new(f.path()).fetch().unwrap_err();
        assert!(format!("{err:#}").starts_with("parse "));
    }
}
