use crate::client::AsyncDexScreenerClient;
use crate::error::{DexScreenerError, DexScreenerResult};
use crate::models::Token;
use crate::repositories::traits::TokenRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Token repository backed by the DexScreener API.
///
/// Fetches pairs through the async client and reshapes them into tokens.
pub struct DexTokenRepository {
    client: Arc<dyn AsyncDexScreenerClient>,
}

impl DexTokenRepository {
    pub fn new(client: Arc<dyn AsyncDexScreenerClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TokenRepository for DexTokenRepository {
    async fn list(&self, search: Option<&str>) -> DexScreenerResult<Vec<Token>> {
        let pairs = match search {
            Some(query) => self.client.search_pairs(query).await?,
            None => self.client.list_pairs().await?,
        };

        Ok(pairs.iter().map(Token::from_listing_pair).collect())
    }

    async fn get(&self, address: &str) -> DexScreenerResult<Token> {
        let pairs = self.client.get_token_pairs(address).await?;

        pairs
            .first()
            .map(Token::from_lookup_pair)
            .ok_or_else(|| DexScreenerError::NotFound("Token not found".to_string()))
    }
}
