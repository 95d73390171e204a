//! HTTP client for the DexScreener API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles error mapping and decoding of
//! the pair envelopes DexScreener returns.

mod async_wrapper;
pub use async_wrapper::{AsyncDexScreenerClient, AsyncDexScreenerClientImpl};

use crate::config::Config;
use crate::error::{DexScreenerError, DexScreenerResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{Pair, PairsResponse};
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the DexScreener API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct DexScreenerClient {
    /// Base URL, e.g. `https://api.dexscreener.com/latest/dex`
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl DexScreenerClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.dexscreener_api_url.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        Self::build(base_url, Duration::from_secs(10))
    }

    fn build(base_url: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Share a metrics collector with other components.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a GET request and return the response body.
    fn get(&self, path: &str) -> DexScreenerResult<String> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);

        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call()
            .map_err(|e| self.map_error(e))
            .and_then(|response| {
                response
                    .into_string()
                    .map_err(|e| DexScreenerError::HttpError(e.to_string()))
            });

        match &result {
            Ok(_) => timer.complete(),
            Err(e) => {
                tracing::debug!("GET {} - Error: {:?}", url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    /// Map a ureq error to a DexScreenerError.
    fn map_error(&self, error: ureq::Error) -> DexScreenerError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    404 => DexScreenerError::NotFound(message),
                    429 => DexScreenerError::RateLimitExceeded,
                    _ => DexScreenerError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    DexScreenerError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    DexScreenerError::Timeout
                } else {
                    DexScreenerError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Fetch and decode a pair envelope.
    ///
    /// `Ok(None)` means the body decoded but carried no pair list.
    fn fetch_pairs(&self, path: &str) -> DexScreenerResult<Option<Vec<Pair>>> {
        let body = self.get(path)?;
        let response: PairsResponse = serde_json::from_str(&body)?;
        let pairs = response.into_pairs();

        if let Some(pairs) = &pairs {
            self.metrics.record_pairs_fetched(pairs.len());
        }
        Ok(pairs)
    }

    // ========================= Pair Operations =========================

    /// Search pairs matching a free-text query (symbol, name or address).
    pub fn search_pairs(&self, query: &str) -> DexScreenerResult<Vec<Pair>> {
        let path = format!("/search?q={}", urlencoding::encode(query));
        self.fetch_pairs(&path)?
            .ok_or_else(|| DexScreenerError::InvalidResponse("missing pair list".to_string()))
    }

    /// List pairs from the token endpoint without a filter.
    pub fn list_pairs(&self) -> DexScreenerResult<Vec<Pair>> {
        self.fetch_pairs("/tokens/")?
            .ok_or_else(|| DexScreenerError::InvalidResponse("missing pair list".to_string()))
    }

    /// Get all pairs that trade the token at `address`.
    ///
    /// A missing pair list reads as no pairs.
    pub fn get_token_pairs(&self, address: &str) -> DexScreenerResult<Vec<Pair>> {
        let path = format!("/tokens/{}", urlencoding::encode(address));
        Ok(self.fetch_pairs(&path)?.unwrap_or_default())
    }
}
