//! Simulated trade models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a trade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn from_is_buy(is_buy: bool) -> Self {
        if is_buy {
            TradeSide::Buy
        } else {
            TradeSide::Sell
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TradeSide::Buy => "Buy",
            TradeSide::Sell => "Sell",
        }
    }
}

/// Parameters of a trade to simulate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub token_address: String,
    pub amount: f64,
    pub side: TradeSide,

    /// Reference price in USD
    pub price: f64,

    /// Slippage tolerance in percent
    pub slippage: f64,
}

impl TradeRequest {
    /// Reference price adjusted by slippage: `price * (1 + slippage / 100)`.
    pub fn simulated_price(&self) -> f64 {
        self.price * (1.0 + self.slippage / 100.0)
    }

    /// One-line human summary of the request.
    pub fn describe(&self) -> String {
        format!(
            "Simulated {} of {} {} with {}% slippage",
            self.side.label(),
            self.amount,
            self.token_address,
            self.slippage
        )
    }
}

/// Lifecycle status of a simulated trade. Simulations always execute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Executed,
}

/// A simulated trade as recorded in history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    #[serde(flatten)]
    pub request: TradeRequest,
    pub timestamp: DateTime<Utc>,
    pub status: TradeStatus,
    pub simulated_price: f64,
}

impl Trade {
    /// Execute `request` at `timestamp`.
    pub fn execute(request: TradeRequest, timestamp: DateTime<Utc>) -> Self {
        let simulated_price = request.simulated_price();
        Self {
            request,
            timestamp,
            status: TradeStatus::Executed,
            simulated_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(side: TradeSide) -> TradeRequest {
        TradeRequest {
            token_address: "0xabc".to_string(),
            amount: 10.0,
            side,
            price: 2.0,
            slippage: 0.5,
        }
    }

    #[test]
    fn test_simulated_price_applies_slippage() {
        assert!((request(TradeSide::Buy).simulated_price() - 2.01).abs() < 1e-12);

        let mut zero = request(TradeSide::Buy);
        zero.slippage = 0.0;
        assert_eq!(zero.simulated_price(), 2.0);
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            request(TradeSide::Buy).describe(),
            "Simulated Buy of 10 0xabc with 0.5% slippage"
        );
        assert_eq!(
            request(TradeSide::Sell).describe(),
            "Simulated Sell of 10 0xabc with 0.5% slippage"
        );
    }

    #[test]
    fn test_trade_serializes_flat() {
        let trade = Trade::execute(request(TradeSide::Sell), Utc::now());
        let json = serde_json::to_value(&trade).unwrap();

        assert_eq!(json["tokenAddress"], "0xabc");
        assert_eq!(json["side"], "sell");
        assert_eq!(json["status"], "executed");
        assert!(json["timestamp"].is_string());
        assert!(json.get("request").is_none());
    }
}
