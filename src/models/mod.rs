//! Data models for the gateway.
//!
//! Upstream DexScreener pairs, the reshaped tokens served to callers, and
//! simulated trades.

pub mod pair;
pub mod token;
pub mod trade;

pub use pair::{Liquidity, Pair, PairToken, PairsResponse, PriceChange};
pub use token::Token;
pub use trade::{Trade, TradeRequest, TradeSide, TradeStatus};
