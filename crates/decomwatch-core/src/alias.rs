//! Cluster aliases from the `mc` client's `config.json`.
//!
//! Layout: `{"version": "10", "aliases": {"<name>": {"url", "accessKey", "secretKey", "api", "path"}}}`.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Connection details for one alias.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasConfig {
    pub url: String,
    pub access_key: String,
    pub secret_key: String,
    #[serde(default)]
    pub api: String,
    #[serde(default)]
    pub path: String,
}

impl AliasConfig {
    /// Parse the alias URL, accepting only `http` and `https`.
    pub fn endpoint(&self) -> Result<Url, AliasError> {
        let url = Url::parse(&self.url).map_err(|source| AliasError::InvalidUrl {
            url: self.url.clone(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" if url.host_str().is_some() => Ok(url),
            _ => Err(AliasError::UnsupportedUrl(self.url.clone())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct McConfig {
    #[serde(default)]
    aliases: HashMap<String, AliasConfig>,
}

#[derive(Debug, Error)]
pub enum AliasError {
    #[error("cannot determine home directory; pass --config-dir")]
    NoHomeDir,
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("alias {alias:?} not found in {}", dir.display())]
    NotFound { alias: String, dir: PathBuf },
    #[error("parse URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported alias URL {0:?} (expected http:// or https:// with a host)")]
    UnsupportedUrl(String),
}

/// Default alias store directory: `$HOME/.mc`.
pub fn default_config_dir() -> Result<PathBuf, AliasError> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(|h| PathBuf::from(h).join(".mc"))
        .ok_or(AliasError::NoHomeDir)
}

/// Look up `alias` in `<config_dir>/config.json` (default `~/.mc`).
pub fn load_alias(alias: &str, config_dir: Option<&Path>) -> Result<AliasConfig, AliasError> {
    let dir = match config_dir {
        Some(d) => d.to_path_buf(),
        None => default_config_dir()?,
    };
    let path = dir.join("config.json");
    let data = fs::read(&path).map_err(|source| AliasError::Read {
        path: path.clone(),
        source,
    })?;
    let cfg: McConfig = serde_json::from_slice(&data).map_err(|source| AliasError::Parse {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), aliases = cfg.aliases.len(), "loaded alias store");

    cfg.aliases
        .get(alias)
        .cloned()
        .ok_or_else(|| AliasError::NotFound {
            alias: alias.to_string(),
            dir,
        })
}
