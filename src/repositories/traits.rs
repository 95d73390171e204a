use crate::error::DexScreenerResult;
use crate::models::Token;
use async_trait::async_trait;

/// Repository for token data.
///
/// Provides abstraction over token retrieval, enabling different
/// implementations (API client, mock, cached).
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// List tokens, optionally filtered by a free-text search.
    async fn list(&self, search: Option<&str>) -> DexScreenerResult<Vec<Token>>;

    /// Retrieve a single token by contract address.
    async fn get(&self, address: &str) -> DexScreenerResult<Token>;
}
