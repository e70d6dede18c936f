//! Raw-content transport
//!
//! `RawContentSource` is the seam between the README fetcher and the network,
//! so tests can substitute deterministic stand-ins.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{Error, Result};

/// User agent sent with raw-content requests
const USER_AGENT: &str = concat!("cireview/", env!("CARGO_PKG_VERSION"));

/// A completed raw-content response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// Whether the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for raw-content retrieval
#[async_trait]
pub trait RawContentSource: Send + Sync {
    /// Issue one bounded-time GET
    async fn get_raw(&self, url: &str, timeout: Duration) -> Result<RawResponse>;
}

/// `reqwest`-backed raw-content source
#[derive(Debug, Clone)]
pub struct HttpRawSource {
    client: reqwest::Client,
}

impl HttpRawSource {
    /// Create a new HTTP source
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RawContentSource for HttpRawSource {
    async fn get_raw(&self, url: &str, timeout: Duration) -> Result<RawResponse> {
        debug!(url = %url, timeout_ms = timeout.as_millis() as u64, "GET raw content");

        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                Error::Timeout(timeout)
            } else {
                Error::Transport(e.to_string())
            }
        };

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(map_err)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_err)?;

        Ok(RawResponse { status, body })
    }
}
