//! DexScreener Gateway - a token price gateway for the DexScreener API.
//!
//! This library proxies and reshapes DexScreener pair data into tokens,
//! simulates trades, and caches upstream responses through a cache-aside
//! accessor backed by Redis or an in-process store.
//!
//! # Architecture
//!
//! - **cache**: Cache-aside accessor, degraded-value fallback, and key-value stores
//! - **client**: HTTP client for the DexScreener API
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling
//! - **metrics**: Request and cache counters
//! - **models**: Upstream pairs, reshaped tokens, and simulated trades
//! - **repositories**: Token repositories (upstream and cached)
//! - **services**: Token listing/lookup and trade simulation
//! - **server**: MCP protocol server

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

pub use cache::{CacheAside, ConnectionState, KeyValueStore, MemoryStore, RedisStore, WriteOutcome};
pub use client::DexScreenerClient;
pub use config::{CacheBackend, Config};
pub use error::{CacheError, ConfigError, DexScreenerError, StoreError, TradeError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{Pair, Token, Trade, TradeRequest, TradeSide};
pub use server::GatewayMcpServer;
