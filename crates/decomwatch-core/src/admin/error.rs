//! Errors from talking to the cluster's admin API.

use thiserror::Error;

use crate::alias::AliasError;

#[derive(Debug, Error)]
pub enum AdminError {
    /// The alias could not be turned into an endpoint.
    #[error(transparent)]
    Alias(#[from] AliasError),
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error("admin request failed: {0}")]
    Curl(#[from] curl::Error),
    /// Non-2xx response; `body` is the server's error document, trimmed.
    #[error("admin API returned HTTP {status}: {body}")]
    Http { status: u32, body: String },
    /// 2xx response whose body is not a pools-status document.
    #[error("decode pools status: {0}")]
    Decode(#[from] serde_json::Error),
}
