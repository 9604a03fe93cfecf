//! Blocking admin API client (libcurl) for the pools-status query.
//!
//! Runs in the current thread; call from `spawn_blocking` if used from async code.

mod error;
pub mod sign;

pub use error::AdminError;

use chrono::Utc;
use std::time::Duration;
use url::Url;

use crate::alias::{AliasConfig, AliasError};
use crate::config::DecomwatchConfig;
use crate::snapshot::{parse_pools_status, PoolDecommissionSnapshot};
use sign::Signer;

/// Admin API path listing every pool with its decommission status.
pub const POOLS_LIST_PATH: &str = "/minio/admin/v3/pools/list";

/// Longest error body kept in [`AdminError::Http`].
const MAX_ERROR_BODY: usize = 512;

/// Transport knobs for [`AdminClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Skip certificate verification on `https` endpoints.
    pub insecure_tls: bool,
    pub region: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::from(&DecomwatchConfig::default())
    }
}

impl From<&DecomwatchConfig> for ClientOptions {
    fn from(cfg: &DecomwatchConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout(),
            request_timeout: cfg.request_timeout(),
            insecure_tls: cfg.insecure_tls,
            region: sign::DEFAULT_REGION.to_string(),
        }
    }
}

/// Authenticated client for one cluster alias.
#[derive(Debug, Clone)]
pub struct AdminClient {
    endpoint: Url,
    /// `host[:port]` exactly as curl sends it in the `Host` header.
    host: String,
    access_key: String,
    secret_key: String,
    options: ClientOptions,
}

impl AdminClient {
    pub fn new(alias: &AliasConfig, options: ClientOptions) -> Result<Self, AdminError> {
        let endpoint = alias.endpoint()?;
        let host = match (endpoint.host_str(), endpoint.port()) {
            (Some(h), Some(p)) => format!("{h}:{p}"),
            (Some(h), None) => h.to_string(),
            (None, _) => {
                return Err(AliasError::UnsupportedUrl(alias.url.clone()).into())
            }
        };
        Ok(Self {
            endpoint,
            host,
            access_key: alias.access_key.clone(),
            secret_key: alias.secret_key.clone(),
            options,
        })
    }

    pub fn is_secure(&self) -> bool {
        self.endpoint.scheme() == "https"
    }

    /// Full URL for an admin API path.
    pub fn url_for(&self, path: &str) -> String {
        let mut url = self.endpoint.clone();
        url.set_path(path);
        url.set_query(None);
        url.to_string()
    }

    /// Fetch the decommission status of every pool in the cluster.
    pub fn list_pools_status(&self) -> Result<Vec<PoolDecommissionSnapshot>, AdminError> {
        let body = self.get(POOLS_LIST_PATH)?;
        Ok(parse_pools_status(&body)?)
    }

    /// Signed GET; returns the body of a 2xx response.
    fn get(&self, path: &str) -> Result<Vec<u8>, AdminError> {
        let url = self.url_for(path);
        let signed = Signer {
            access_key: &self.access_key,
            secret_key: &self.secret_key,
            region: &self.options.region,
        }
        .sign("GET", &self.host, path, Utc::now());

        let mut easy = curl::easy::Easy::new();
        easy.url(&url)?;
        easy.get(true)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        easy.timeout(self.options.request_timeout)?;
        if self.is_secure() && self.options.insecure_tls {
            easy.ssl_verify_peer(false)?;
            easy.ssl_verify_host(false)?;
        }

        let mut list = curl::easy::List::new();
        list.append(&format!("X-Amz-Date: {}", signed.amz_date))?;
        list.append(&format!("X-Amz-Content-Sha256: {}", signed.content_sha256))?;
        list.append(&format!("Authorization: {}", signed.authorization))?;
        easy.http_headers(list)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!(%url, status, bytes = body.len(), "admin request complete");
        if !(200..300).contains(&status) {
            let text = String::from_utf8_lossy(&body);
            let text = text.trim();
            let cut = text
                .char_indices()
                .nth(MAX_ERROR_BODY)
                .map(|(i, _)| i)
                .unwrap_or(text.len());
            return Err(AdminError::Http {
                status,
                body: text[..cut].to_string(),
            });
        }
        Ok(body)
    }
}
