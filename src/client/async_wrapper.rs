//! Async wrapper around the synchronous DexScreenerClient.
//!
//! This module provides an async interface to the synchronous client by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::DexScreenerClient;
use crate::error::{DexScreenerError, DexScreenerResult};
use crate::models::Pair;
use async_trait::async_trait;
use std::sync::Arc;

/// Async client operations against DexScreener.
#[async_trait]
pub trait AsyncDexScreenerClient: Send + Sync {
    async fn search_pairs(&self, query: &str) -> DexScreenerResult<Vec<Pair>>;
    async fn list_pairs(&self) -> DexScreenerResult<Vec<Pair>>;
    async fn get_token_pairs(&self, address: &str) -> DexScreenerResult<Vec<Pair>>;
}

/// Async wrapper around the synchronous client.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool.
#[derive(Clone)]
pub struct AsyncDexScreenerClientImpl {
    client: Arc<DexScreenerClient>,
}

impl AsyncDexScreenerClientImpl {
    pub fn new(client: DexScreenerClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> DexScreenerError {
    DexScreenerError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncDexScreenerClient for AsyncDexScreenerClientImpl {
    async fn search_pairs(&self, query: &str) -> DexScreenerResult<Vec<Pair>> {
        let client = self.client.clone();
        let query = query.to_string();

        tokio::task::spawn_blocking(move || client.search_pairs(&query))
            .await
            .map_err(join_error)?
    }

    async fn list_pairs(&self) -> DexScreenerResult<Vec<Pair>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_pairs())
            .await
            .map_err(join_error)?
    }

    async fn get_token_pairs(&self, address: &str) -> DexScreenerResult<Vec<Pair>> {
        let client = self.client.clone();
        let address = address.to_string();

        tokio::task::spawn_blocking(move || client.get_token_pairs(&address))
            .await
            .map_err(join_error)?
    }
}
