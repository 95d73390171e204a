//! DexScreener Gateway - Main entry point
//!
//! Serves DexScreener token data and trade simulation as MCP tools over stdio.

use anyhow::Result;
use dexscreener_gateway::client::{AsyncDexScreenerClient, AsyncDexScreenerClientImpl};
use dexscreener_gateway::repositories::{CachedTokenRepository, DexTokenRepository, TokenRepository};
use dexscreener_gateway::services::{TokenService, TokenServiceImpl, TradeService, TradeServiceImpl};
use dexscreener_gateway::{
    CacheAside, CacheBackend, Config, DexScreenerClient, GatewayMcpServer, KeyValueStore,
    MemoryStore, Metrics, RedisStore,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let default_level = config
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting DexScreener gateway with API URL: {}",
        config.dexscreener_api_url
    );

    let metrics = Metrics::new();

    // Initialize the cache store. Redis connects lazily on first use.
    let store: Arc<dyn KeyValueStore> = match config.cache_backend {
        CacheBackend::Redis => Arc::new(RedisStore::open(&config.redis_url)?),
        CacheBackend::Memory => {
            let store = MemoryStore::new();
            store.spawn_cleanup(Duration::from_secs(config.cache_ttl_seconds));
            Arc::new(store)
        }
    };
    info!("Cache backend: {}", store.name());

    let cache = CacheAside::with_default_ttl(store, config.cache_ttl_seconds)
        .with_metrics(metrics.clone());

    // Initialize DexScreener client
    let sync_client = DexScreenerClient::new(&config).with_metrics(metrics.clone());
    let client =
        Arc::new(AsyncDexScreenerClientImpl::new(sync_client)) as Arc<dyn AsyncDexScreenerClient>;

    // Initialize repositories
    let upstream = Arc::new(DexTokenRepository::new(client)) as Arc<dyn TokenRepository>;
    let token_repo = Arc::new(CachedTokenRepository::new(
        upstream,
        cache,
        config.cache_ttl_seconds,
    )) as Arc<dyn TokenRepository>;

    // Initialize services
    let token_service = Arc::new(TokenServiceImpl::new(token_repo, config.max_token_results))
        as Arc<dyn TokenService>;
    let trade_service = Arc::new(TradeServiceImpl::new()) as Arc<dyn TradeService>;

    let server = GatewayMcpServer::new(token_service, trade_service, metrics);

    info!(
        "Cache TTL: {} seconds, page size: {}",
        config.cache_ttl_seconds, config.max_token_results
    );

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    dexscreener_gateway::server::run_server(server).await?;

    info!("DexScreener gateway shutdown complete");
    Ok(())
}
