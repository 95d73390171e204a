use async_trait::async_trait;
use dexscreener_gateway::cache::{KeyValueStore, MemoryStore};
use dexscreener_gateway::error::{StoreError, StoreResult};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Mock key-value store for testing.
///
/// Wraps a MemoryStore, counts connect attempts, and can be told to fail
/// connects or the next command, or to expire everything it holds.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockStore {
    inner: MemoryStore,
    connect_calls: Arc<AtomicUsize>,
    fail_connect: Arc<AtomicBool>,
    fail_next_command: Arc<AtomicBool>,
    connect_delay: Option<Duration>,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every connect take `delay`, widening race windows.
    pub fn with_connect_delay(mut self, delay: Duration) -> Self {
        self.connect_delay = Some(delay);
        self
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_connect(&self, fail: bool) {
        self.fail_connect.store(fail, Ordering::SeqCst);
    }

    /// Fail the next get or set with a connection error.
    pub fn fail_next_command(&self) {
        self.fail_next_command.store(true, Ordering::SeqCst);
    }

    /// Simulate every entry reaching its deadline.
    pub fn expire_all(&self) {
        self.inner.clear();
    }

    pub fn insert_raw(&self, key: &str, value: &[u8]) {
        self.inner.insert_raw(key, value, Duration::from_secs(300));
    }

    /// Raw bytes currently held under `key`.
    pub async fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.get(key).await.ok().flatten()
    }

    fn take_command_failure(&self) -> StoreResult<()> {
        if self.fail_next_command.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Connection("connection reset by peer".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MockStore {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn connect(&self) -> StoreResult<()> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.connect_delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_connect.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("connection refused".to_string()));
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.take_command_failure()?;
        self.inner.get(key).await
    }

    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl_seconds: u64) -> StoreResult<()> {
        self.take_command_failure()?;
        self.inner.set_with_expiry(key, value, ttl_seconds).await
    }
}
