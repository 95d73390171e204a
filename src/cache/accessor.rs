//! Cache-aside accessor over a [`KeyValueStore`].
//!
//! The accessor owns the connection state for its store. It connects lazily
//! before the first operation, serializes concurrent connect attempts so only
//! one reaches the store, and falls back to `Disconnected` whenever the store
//! reports an error so the next call reconnects. Retrying a failed call is
//! left to the caller.

use crate::cache::degrade::{degrade, COMPLEX_DATA_SENTINEL};
use crate::cache::store::KeyValueStore;
use crate::config::DEFAULT_CACHE_TTL_SECONDS;
use crate::error::{CacheError, CacheResult, StoreError};
use crate::metrics::Metrics;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Link state between the accessor and its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// How a `set` call ended up being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The full value was written.
    Stored,
    /// The value could not be serialized; a shallow redacted copy was written.
    Degraded,
}

impl WriteOutcome {
    pub fn is_degraded(self) -> bool {
        self == WriteOutcome::Degraded
    }
}

/// Cache-aside accessor.
///
/// Cloning shares the store, the connection state, and the metrics.
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn KeyValueStore>,
    connected: Arc<AtomicBool>,
    // Bumped once per finished connect attempt.
    connect_attempts: Arc<AtomicU64>,
    // Held for the duration of a connect attempt. Holds the error of the
    // last attempt, if it failed.
    connect_lock: Arc<Mutex<Option<StoreError>>>,
    default_ttl_seconds: u64,
    metrics: Metrics,
}

impl CacheAside {
    /// Create an accessor with the default TTL of 300 seconds.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_default_ttl(store, DEFAULT_CACHE_TTL_SECONDS)
    }

    pub fn with_default_ttl(store: Arc<dyn KeyValueStore>, default_ttl_seconds: u64) -> Self {
        Self {
            store,
            connected: Arc::new(AtomicBool::new(false)),
            connect_attempts: Arc::new(AtomicU64::new(0)),
            connect_lock: Arc::new(Mutex::new(None)),
            default_ttl_seconds,
            metrics: Metrics::new(),
        }
    }

    /// Share a metrics collector with other components.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn default_ttl_seconds(&self) -> u64 {
        self.default_ttl_seconds
    }

    pub fn connection_state(&self) -> ConnectionState {
        if self.connected.load(Ordering::Acquire) {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Record an error reported by the store and drop back to `Disconnected`.
    ///
    /// Called for every store error seen by this accessor. Store
    /// implementations with out-of-band error notifications can call it too.
    pub fn on_store_error(&self, error: &StoreError) {
        tracing::error!(store = self.store.name(), error = %error, "Cache store error");
        self.metrics.record_store_error();
        self.connected.store(false, Ordering::Release);
    }

    /// Ensure a session exists, connecting if needed.
    ///
    /// Callers that queue behind an in-flight attempt share its outcome,
    /// success or failure, instead of trying again themselves.
    async fn connect(&self) -> CacheResult<()> {
        if self.connected.load(Ordering::Acquire) {
            return Ok(());
        }

        let seen = self.connect_attempts.load(Ordering::Acquire);
        let mut last_error = self.connect_lock.lock().await;

        // Another caller may have connected while we waited.
        if self.connected.load(Ordering::Acquire) {
            return Ok(());
        }
        if self.connect_attempts.load(Ordering::Acquire) != seen {
            if let Some(e) = last_error.as_ref() {
                return Err(CacheError::StoreUnavailable(e.clone()));
            }
        }

        tracing::debug!(store = self.store.name(), "Connecting to cache store");
        let result = self.store.connect().await;
        self.connect_attempts.fetch_add(1, Ordering::AcqRel);

        match result {
            Ok(()) => {
                *last_error = None;
                self.connected.store(true, Ordering::Release);
                Ok(())
            }
            Err(e) => {
                self.on_store_error(&e);
                *last_error = Some(e.clone());
                Err(CacheError::StoreUnavailable(e))
            }
        }
    }

    fn validate_key(key: &str) -> CacheResult<()> {
        if key.is_empty() {
            return Err(CacheError::InvalidArgument(
                "Cache key cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Read and decode the value stored under `key`.
    ///
    /// Returns `Ok(None)` for missing or expired keys and
    /// [`CacheError::Corruption`] when the stored bytes do not decode as `T`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        Self::validate_key(key)?;
        self.connect().await?;

        let bytes = match self.store.get(key).await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.on_store_error(&e);
                return Err(CacheError::StoreUnavailable(e));
            }
        };

        let Some(bytes) = bytes else {
            tracing::trace!(key = %key, "Cache miss");
            self.metrics.record_cache_access(false);
            return Ok(None);
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                tracing::trace!(key = %key, "Cache hit");
                self.metrics.record_cache_access(true);
                Ok(Some(value))
            }
            Err(source) => {
                self.metrics.record_corruption();
                Err(CacheError::Corruption {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }

    /// Write `value` under `key` with a TTL.
    ///
    /// Never fails because of serialization: a value that cannot be encoded
    /// is written in its degraded form and [`WriteOutcome::Degraded`] is
    /// returned.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> CacheResult<WriteOutcome> {
        Self::validate_key(key)?;
        if ttl_seconds == 0 {
            return Err(CacheError::InvalidArgument(
                "TTL must be greater than zero".to_string(),
            ));
        }
        self.connect().await?;

        let (bytes, outcome) = match serde_json::to_vec(value) {
            Ok(bytes) => (bytes, WriteOutcome::Stored),
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    error = %e,
                    "Cache serialization failed, writing degraded value"
                );
                (degraded_bytes(value), WriteOutcome::Degraded)
            }
        };

        if let Err(e) = self.store.set_with_expiry(key, &bytes, ttl_seconds).await {
            self.on_store_error(&e);
            return Err(CacheError::StoreUnavailable(e));
        }

        if outcome.is_degraded() {
            self.metrics.record_degraded_write();
        }
        Ok(outcome)
    }

    /// [`get`](Self::get) under the accessor's default naming.
    pub async fn get_cached_data<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        self.get(key).await
    }

    /// [`set`](Self::set) with the accessor's default TTL.
    pub async fn set_cached_data<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> CacheResult<WriteOutcome> {
        self.set(key, value, self.default_ttl_seconds).await
    }

    /// Return the cached value for `key`, or compute, cache, and return it.
    ///
    /// Cache trouble never fails the call: a corrupted entry or an
    /// unreachable store is treated as a miss and logged. Errors from
    /// `compute` are returned unchanged.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: &str,
        ttl_seconds: u64,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.get::<T>(key).await {
            Ok(Some(value)) => return Ok(value),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed, recomputing");
            }
        }

        let value = compute().await?;

        if let Err(e) = self.set(key, &value, ttl_seconds).await {
            tracing::warn!(key = %key, error = %e, "Cache write failed");
        }

        Ok(value)
    }
}

fn degraded_bytes<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    let degraded = degrade(value)
        .unwrap_or_else(|_| serde_json::Value::String(COMPLEX_DATA_SENTINEL.to_string()));

    serde_json::to_vec(&degraded)
        .unwrap_or_else(|_| format!("\"{}\"", COMPLEX_DATA_SENTINEL).into_bytes())
}

impl std::fmt::Debug for CacheAside {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheAside")
            .field("store", &self.store.name())
            .field("state", &self.connection_state())
            .field("default_ttl_seconds", &self.default_ttl_seconds)
            .finish()
    }
}
