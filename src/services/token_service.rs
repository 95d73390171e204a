//! Token service layer.
//!
//! Validation and pagination on top of a token repository.

use crate::config::MAX_PAGE_SIZE;
use crate::error::{DexScreenerError, DexScreenerResult};
use crate::models::Token;
use crate::repositories::TokenRepository;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;

static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{1,128}$").unwrap());

const MAX_SEARCH_LEN: usize = 200;

/// One page of a token listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TokenPage {
    pub tokens: Vec<Token>,
    /// Number of tokens before slicing
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
}

/// Token service trait for business operations.
#[async_trait]
pub trait TokenService: Send + Sync {
    /// List tokens matching an optional search, sliced to `[offset, offset + limit)`.
    async fn list_tokens(
        &self,
        search: Option<String>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> DexScreenerResult<TokenPage>;

    /// Look up a single token by contract address.
    async fn get_token(&self, address: &str) -> DexScreenerResult<Token>;
}

/// Default implementation of TokenService.
pub struct TokenServiceImpl {
    repository: Arc<dyn TokenRepository>,
    default_limit: usize,
}

/// Validation helper functions.
impl TokenServiceImpl {
    /// Normalize a search query. Blank queries mean "no filter".
    fn normalize_search(search: Option<String>) -> Result<Option<String>, String> {
        let Some(search) = search else {
            return Ok(None);
        };

        let trimmed = search.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.len() > MAX_SEARCH_LEN {
            return Err(format!(
                "Search query too long (max {} characters)",
                MAX_SEARCH_LEN
            ));
        }
        Ok(Some(trimmed.to_string()))
    }

    /// Validate a token contract address.
    fn validate_address(address: &str) -> Result<(), String> {
        if address.trim().is_empty() {
            return Err("Token address cannot be empty".to_string());
        }
        if !ADDRESS_RE.is_match(address) {
            return Err(format!("Invalid token address: {}", address));
        }
        Ok(())
    }
}

impl TokenServiceImpl {
    pub fn new(repository: Arc<dyn TokenRepository>, default_limit: usize) -> Self {
        Self {
            repository,
            default_limit: default_limit.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

/// Slice `tokens` to one page.
fn paginate(mut tokens: Vec<Token>, limit: usize, offset: usize) -> TokenPage {
    let total = tokens.len();

    if offset >= total {
        tokens.clear();
    } else {
        tokens.drain(..offset);
        tokens.truncate(limit);
    }

    TokenPage {
        tokens,
        total,
        offset,
        limit,
    }
}

#[async_trait]
impl TokenService for TokenServiceImpl {
    async fn list_tokens(
        &self,
        search: Option<String>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> DexScreenerResult<TokenPage> {
        let search = Self::normalize_search(search).map_err(DexScreenerError::InvalidRequest)?;
        let limit = limit.unwrap_or(self.default_limit).min(MAX_PAGE_SIZE);
        let offset = offset.unwrap_or(0);

        let tokens = self.repository.list(search.as_deref()).await?;
        Ok(paginate(tokens, limit, offset))
    }

    async fn get_token(&self, address: &str) -> DexScreenerResult<Token> {
        Self::validate_address(address).map_err(DexScreenerError::InvalidRequest)?;
        self.repository.get(address).await
    }
}
