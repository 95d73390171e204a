use crate::cache::CacheAside;
use crate::error::DexScreenerResult;
use crate::models::Token;
use crate::repositories::traits::TokenRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Cache-aside decorator for any [`TokenRepository`].
///
/// Results are cached per query for `ttl_seconds`. Upstream errors are never
/// cached.
pub struct CachedTokenRepository {
    inner: Arc<dyn TokenRepository>,
    cache: CacheAside,
    ttl_seconds: u64,
}

impl CachedTokenRepository {
    pub fn new(inner: Arc<dyn TokenRepository>, cache: CacheAside, ttl_seconds: u64) -> Self {
        Self {
            inner,
            cache,
            ttl_seconds,
        }
    }

    /// Cache key for a listing. Searches are case-insensitive upstream.
    pub fn list_key(search: Option<&str>) -> String {
        match search {
            Some(query) => format!("tokens:search:{}", query.to_lowercase()),
            None => "tokens:all".to_string(),
        }
    }

    pub fn token_key(address: &str) -> String {
        format!("token:{}", address)
    }
}

#[async_trait]
impl TokenRepository for CachedTokenRepository {
    async fn list(&self, search: Option<&str>) -> DexScreenerResult<Vec<Token>> {
        let key = Self::list_key(search);
        self.cache
            .get_or_compute(&key, self.ttl_seconds, || self.inner.list(search))
            .await
    }

    async fn get(&self, address: &str) -> DexScreenerResult<Token> {
        let key = Self::token_key(address);
        self.cache
            .get_or_compute(&key, self.ttl_seconds, || self.inner.get(address))
            .await
    }
}
