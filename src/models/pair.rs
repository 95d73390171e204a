//! Pair model returned by the DexScreener API.
//!
//! DexScreener reports prices as decimal strings and most other figures as
//! numbers, and omits fields freely. Every field here is optional and numeric
//! fields accept either representation.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode a number that may arrive as a JSON number or a decimal string.
///
/// Unparseable strings and other shapes decode as `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Token identity on one side of a pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PairToken {
    pub address: Option<String>,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// Price change percentages over rolling windows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PriceChange {
    #[serde(deserialize_with = "lenient_f64")]
    pub m5: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub h1: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub h6: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub h24: Option<f64>,
}

/// Pool liquidity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Liquidity {
    #[serde(deserialize_with = "lenient_f64")]
    pub usd: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub base: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub quote: Option<f64>,
}

/// A trading pair on some DEX.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Pair {
    pub chain_id: Option<String>,
    pub dex_id: Option<String>,
    pub url: Option<String>,
    pub pair_address: Option<String>,
    pub base_token: Option<PairToken>,
    pub quote_token: Option<PairToken>,
    #[serde(deserialize_with = "lenient_f64")]
    pub price_native: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub price_usd: Option<f64>,
    pub price_change: Option<PriceChange>,
    pub liquidity: Option<Liquidity>,
    #[serde(deserialize_with = "lenient_f64")]
    pub fdv: Option<f64>,
}

/// Envelope of the search and token endpoints.
///
/// The listing endpoint has been seen to answer with `data` instead of
/// `pairs`; either is accepted.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PairsResponse {
    pub pairs: Option<Vec<Pair>>,
    pub data: Option<Vec<Pair>>,
}

impl PairsResponse {
    /// The pair list, preferring `pairs` over `data`.
    pub fn into_pairs(self) -> Option<Vec<Pair>> {
        self.pairs.or(self.data)
    }
}
