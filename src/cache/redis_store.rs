//! Redis-backed key-value store.

use crate::cache::store::KeyValueStore;
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tokio::sync::RwLock;

/// Key-value store over a single multiplexed Redis connection.
///
/// The connection is opened by [`KeyValueStore::connect`] and discarded on
/// any command error, so a later `connect` starts from a fresh session.
pub struct RedisStore {
    client: redis::Client,
    connection: RwLock<Option<MultiplexedConnection>>,
}

impl RedisStore {
    /// Create a store for `url` without connecting.
    pub fn open(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url).map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            connection: RwLock::new(None),
        })
    }

    /// Clone the live connection handle. Multiplexed handles share one socket.
    async fn session(&self) -> StoreResult<MultiplexedConnection> {
        self.connection
            .read()
            .await
            .clone()
            .ok_or_else(|| StoreError::Connection("Not connected".to_string()))
    }

    /// Drop the session and classify the error.
    async fn fail(&self, error: redis::RedisError) -> StoreError {
        *self.connection.write().await = None;
        map_error(error)
    }
}

fn map_error(error: redis::RedisError) -> StoreError {
    if error.is_connection_dropped()
        || error.is_connection_refusal()
        || error.is_io_error()
        || error.is_timeout()
    {
        StoreError::Connection(error.to_string())
    } else {
        StoreError::Command(error.to_string())
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn connect(&self) -> StoreResult<()> {
        let connection = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_error)?;

        *self.connection.write().await = Some(connection);
        tracing::debug!("Connected to Redis");
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut connection = self.session().await?;

        match connection.get::<_, Option<Vec<u8>>>(key).await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.fail(e).await),
        }
    }

    async fn set_with_expiry(&self, key: &str, value: &[u8], ttl_seconds: u64) -> StoreResult<()> {
        let mut connection = self.session().await?;

        match connection.set_ex::<_, _, ()>(key, value, ttl_seconds).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail(e).await),
        }
    }
}
