//! Caching layer for the gateway.
//!
//! A cache-aside accessor over a pluggable key-value store, with Redis and
//! in-memory backends.

pub mod accessor;
pub mod degrade;
pub mod memory_store;
pub mod redis_store;
pub mod store;

pub use accessor::{CacheAside, ConnectionState, WriteOutcome};
pub use degrade::{degrade, COMPLEX_DATA_SENTINEL};
pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
pub use store::KeyValueStore;
