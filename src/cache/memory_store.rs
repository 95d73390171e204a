//! In-process key-value store with per-entry expiry.
//!
//! Serves local runs without Redis and gives tests a store with real TTL
//! semantics.

use crate::cache::store::KeyValueStore;
use crate::error::StoreResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// A stored value with its expiration deadline.
#[derive(Debug, Clone)]
struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// A thread-safe in-memory store.
///
/// Cloning is cheap and clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all expired entries.
    ///
    /// Reads already drop the expired entry they hit; this also clears keys
    /// that are never read again.
    pub fn cleanup_expired(&self) {
        let now = Instant::now();

        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|_, entry| entry.is_live(now));
        }
    }

    /// Run [`cleanup_expired`](Self::cleanup_expired) every `period` on the
    /// current tokio runtime until the handle is aborted.
    pub fn spawn_cleanup(&self, period: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                store.cleanup_expired();
                tracing::trace!(entries = store.len(), "Memory store cleanup");
            }
        })
    }

    /// Number of entries held, including expired ones not yet cleaned up.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Insert raw bytes directly, bypassing any accessor.
    pub fn insert_raw(&self, key: &str, value: &[u8], ttl: Duration) {
        let entry = Entry {
            value: value.to_vec(),
            expires_at: Instant::now() + ttl,
        };

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), entry);
        }
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.len())
            .finish()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn connect(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let now = Instant::now();

        if let Ok(entries) = self.entries.read() {
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired: drop it unless a writer refreshed it in the meantime.
        if let Ok(mut entries) = self.entries.write() {
            if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
                entries.remove(key);
            }
        }

        Ok(None)
    }

    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl_seconds: u64) -> StoreResult<()> {
        self.insert_raw(key, value, Duration::from_secs(ttl_seconds));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();
        store.set_with_expiry("key1", b"value1", 60).await.unwrap();

        assert_eq!(store.get("key1").await.unwrap(), Some(b"value1".to_vec()));
        assert_eq!(store.get("key2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_entry_reads_absent() {
        let store = MemoryStore::new();
        store.insert_raw("key1", b"value1", Duration::from_millis(50));

        assert!(store.get("key1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(store.get("key1").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_removes_unread_expired_entries() {
        let store = MemoryStore::new();
        for i in 0..100 {
            store.insert_raw(&format!("tokens:search:{}", i), b"[]", Duration::from_millis(30));
        }
        store.insert_raw("tokens:all", b"[]", Duration::from_secs(60));
        assert_eq!(store.len(), 101);

        tokio::time::sleep(Duration::from_millis(60)).await;

        store.cleanup_expired();
        assert_eq!(store.len(), 1);
        assert!(store.get("tokens:all").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_spawned_cleanup_shrinks_store() {
        let store = MemoryStore::new();
        for i in 0..50 {
            store.insert_raw(&format!("token:{}", i), b"{}", Duration::from_millis(20));
        }

        let handle = store.spawn_cleanup(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.abort();

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_overwrite_resets_value() {
        let store = MemoryStore::new();
        store.set_with_expiry("key1", b"old", 60).await.unwrap();
        store.set_with_expiry("key1", b"new", 60).await.unwrap();

        assert_eq!(store.get("key1").await.unwrap(), Some(b"new".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store1 = MemoryStore::new();
        let store2 = store1.clone();

        store2.set_with_expiry("key1", b"value1", 60).await.unwrap();
        assert!(store1.get("key1").await.unwrap().is_some());

        store1.clear();
        assert!(store2.is_empty());
    }

    #[test]
    fn test_debug_format() {
        let store = MemoryStore::new();
        let debug_str = format!("{:?}", store);
        assert!(debug_str.contains("MemoryStore"));
    }
}
