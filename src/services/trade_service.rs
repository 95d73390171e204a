//! Trade simulation service.
//!
//! Trades are never sent anywhere. Each simulation is priced with slippage,
//! recorded in an in-process history and returned. The history keeps the most
//! recent [`DEFAULT_HISTORY_LIMIT`] trades unless configured otherwise.

use crate::error::{TradeError, TradeResult};
use crate::models::{Trade, TradeRequest};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use tokio::sync::RwLock;

/// Trades kept in history by default; older ones are dropped first.
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Trade service trait for business operations.
#[async_trait]
pub trait TradeService: Send + Sync {
    /// Simulate `request`, record it, and return the executed trade.
    async fn simulate_trade(&self, request: TradeRequest) -> TradeResult<Trade>;

    /// Retained simulated trades, oldest first.
    async fn trade_history(&self) -> Vec<Trade>;
}

/// Default implementation of TradeService.
pub struct TradeServiceImpl {
    history: RwLock<VecDeque<Trade>>,
    history_limit: usize,
}

impl Default for TradeServiceImpl {
    fn default() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl TradeServiceImpl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` trades (at least one).
    pub fn with_history_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            history: RwLock::new(VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT))),
            history_limit: limit,
        }
    }

    fn validate(request: &TradeRequest) -> Result<(), String> {
        if request.token_address.trim().is_empty() {
            return Err("Token address cannot be empty".to_string());
        }
        if !request.amount.is_finite() || request.amount <= 0.0 {
            return Err("Amount must be a positive number".to_string());
        }
        if !request.price.is_finite() || request.price < 0.0 {
            return Err("Price cannot be negative".to_string());
        }
        if !(0.0..=100.0).contains(&request.slippage) {
            return Err("Slippage must be between 0 and 100 percent".to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl TradeService for TradeServiceImpl {
    async fn simulate_trade(&self, request: TradeRequest) -> TradeResult<Trade> {
        Self::validate(&request).map_err(TradeError::InvalidRequest)?;

        let trade = Trade::execute(request, Utc::now());
        tracing::info!(
            token = %trade.request.token_address,
            side = trade.request.side.label(),
            simulated_price = trade.simulated_price,
            "Trade simulated"
        );

        let mut history = self.history.write().await;
        if history.len() == self.history_limit {
            history.pop_front();
        }
        history.push_back(trade.clone());

        Ok(trade)
    }

    async fn trade_history(&self) -> Vec<Trade> {
        self.history.read().await.iter().cloned().collect()
    }
}
