//! Token model served to clients.

use crate::models::pair::Pair;
use serde::{Deserialize, Serialize};

/// A token as reported to callers, reshaped from a DexScreener pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Token contract address
    pub id: String,
    pub name: String,
    pub symbol: String,

    /// Price in USD
    pub price: f64,

    /// Price change over 24 hours, in percent
    pub price_change_24h: f64,

    /// Pool liquidity in USD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<f64>,
}

impl Token {
    /// Reshape a pair from a search or listing response.
    ///
    /// Missing identity fields fall back to `"N/A"`, `"Unknown"` and `"UNK"`;
    /// missing figures fall back to zero.
    pub fn from_listing_pair(pair: &Pair) -> Self {
        let base = pair.base_token.clone().unwrap_or_default();

        Self {
            id: base.address.unwrap_or_else(|| "N/A".to_string()),
            name: base.name.unwrap_or_else(|| "Unknown".to_string()),
            symbol: base.symbol.unwrap_or_else(|| "UNK".to_string()),
            price: pair.price_usd.unwrap_or(0.0),
            price_change_24h: price_change_24h(pair),
            liquidity: Some(
                pair.liquidity
                    .as_ref()
                    .and_then(|l| l.usd)
                    .unwrap_or(0.0),
            ),
        }
    }

    /// Reshape the lead pair of a single-token lookup. Liquidity is not
    /// reported for lookups.
    pub fn from_lookup_pair(pair: &Pair) -> Self {
        Self {
            liquidity: None,
            ..Self::from_listing_pair(pair)
        }
    }
}

fn price_change_24h(pair: &Pair) -> f64 {
    pair.price_change
        .as_ref()
        .and_then(|change| change.h24)
        .unwrap_or(0.0)
}
