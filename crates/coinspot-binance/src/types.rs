//! Binance wire shapes
//!
//! Field names and spellings follow Binance's REST API documentation so
//! serialized output is drop-in compatible.

use serde::Serialize;

/// Order book snapshot (`GET /api/v3/depth` shape)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Depth {
    pub last_update_id: u64,
    /// `[price, qty]` pairs, stringified
    pub bids: Vec<[String; 2]>,
    pub asks: Vec<[String; 2]>,
}

/// Recent trade (`GET /api/v3/trades` shape)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: u64,
    pub price: String,
    pub qty: String,
    pub quote_qty: String,
    /// Epoch milliseconds
    pub time: i64,
    pub is_buyer_maker: bool,
    pub is_best_match: bool,
}

/// Compressed trade (`GET /api/v3/aggTrades` shape)
///
/// Binance uses single-letter keys on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct AggTrade {
    /// Aggregate trade id
    #[serde(rename = "a")]
    pub agg_id: u64,
    /// Price
    #[serde(rename = "p")]
    pub price: String,
    /// Quantity
    #[serde(rename = "q")]
    pub qty: String,
    /// First trade id
    #[serde(rename = "f")]
    pub first_id: u64,
    /// Last trade id
    #[serde(rename = "l")]
    pub last_id: u64,
    /// Epoch milliseconds
    #[serde(rename = "T")]
    pub time: i64,
    /// Was the buyer the maker?
    #[serde(rename = "m")]
    pub is_buyer_maker: bool,
    /// Was this the best match?
    #[serde(rename = "M")]
    pub is_best_match: bool,
}

/// Account balance line (`GET /api/v3/account` shape)
#[derive(Debug, Clone, Serialize)]
pub struct Balance {
    pub asset: String,
    pub free: String,
    pub locked: String,
}
