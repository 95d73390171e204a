use crate::error::StoreResult;
use async_trait::async_trait;

/// A key-value store with per-key expiry.
///
/// Implementations own entry expiry. Any error they return is treated by the
/// accessor as a lost session, so the next operation reconnects.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// A short backend name for logs, e.g. "redis" or "memory".
    fn name(&self) -> &'static str;

    /// Establish a session. Called by the accessor only while it believes it
    /// is disconnected.
    async fn connect(&self) -> StoreResult<()>;

    /// Fetch raw bytes for `key`. `None` for missing or expired keys.
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Write `value` under `key`, expiring after `ttl_seconds`.
    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl_seconds: u64)
        -> StoreResult<()>;
}
