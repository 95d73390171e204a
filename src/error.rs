//! Error types for the DexScreener gateway.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors reported by a key-value store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or the session was lost
    #[error("Store connection failed: {0}")]
    Connection(String),

    /// A command was rejected or failed mid-flight
    #[error("Store command failed: {0}")]
    Command(String),
}

/// Errors surfaced by the cache-aside accessor.
///
/// Serialization failures on the write path never appear here; they are
/// recovered locally and reported as a degraded write instead.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing store is unreachable or failed during the operation
    #[error("Cache store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// Bytes stored under a key are not valid JSON for the requested type
    #[error("Cached value for key '{key}' is corrupted: {source}")]
    Corruption {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Empty key or zero TTL
    #[error("Invalid cache argument: {0}")]
    InvalidArgument(String),
}

/// Errors that can occur when interacting with the DexScreener API.
#[derive(Error, Debug)]
pub enum DexScreenerError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Response parsed but did not carry a pair list
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors that can occur while simulating trades.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    /// Trade parameters failed validation
    #[error("Invalid trade request: {0}")]
    InvalidRequest(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with CacheError
pub type CacheResult<T> = Result<T, CacheError>;

/// Convenience type alias for Results with DexScreenerError
pub type DexScreenerResult<T> = Result<T, DexScreenerError>;

/// Convenience type alias for Results with TradeError
pub type TradeResult<T> = Result<T, TradeError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
