use async_trait::async_trait;
use dexscreener_gateway::error::{DexScreenerError, DexScreenerResult};
use dexscreener_gateway::repositories::TokenRepository;
use dexscreener_gateway::Token;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock token repository for testing.
///
/// Provides an in-memory implementation of TokenRepository that can be
/// configured with test data and tracks method calls for verification.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockTokenRepository {
    tokens: Arc<Mutex<Vec<Token>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    fail: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_token(&self, token: Token) {
        self.tokens.lock().unwrap().push(token);
    }

    /// Make every call fail with an upstream error.
    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) -> DexScreenerResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if *self.fail.lock().unwrap() {
            return Err(DexScreenerError::ApiError {
                status: 503,
                message: "upstream unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn list(&self, search: Option<&str>) -> DexScreenerResult<Vec<Token>> {
        self.track_call("list")?;

        let tokens = self.tokens.lock().unwrap();
        Ok(match search {
            Some(query) => {
                let query = query.to_lowercase();
                tokens
                    .iter()
                    .filter(|t| {
                        t.symbol.to_lowercase().contains(&query)
                            || t.name.to_lowercase().contains(&query)
                    })
                    .cloned()
                    .collect()
            }
            None => tokens.clone(),
        })
    }

    async fn get(&self, address: &str) -> DexScreenerResult<Token> {
        self.track_call("get")?;

        self.tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == address)
            .cloned()
            .ok_or_else(|| DexScreenerError::NotFound("Token not found".to_string()))
    }
}
