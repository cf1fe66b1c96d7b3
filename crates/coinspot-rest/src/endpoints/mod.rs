//! API endpoint implementations

pub mod account;
pub mod funding;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use funding::FundingEndpoints;
pub use market::MarketEndpoints;
pub use trading::TradingEndpoints;

use serde::Serialize;
use serde_json::{Map, Value};

/// CoinSpot spells market currencies lowercase in paths and bodies
pub(crate) fn normalize_market(market: &str) -> String {
    market.to_lowercase()
}

/// Serialize request parameters into a JSON object body
pub(crate) fn body_of<T: Serialize>(params: &T) -> Map<String, Value> {
    match serde_json::to_value(params).expect("request parameters serialize to JSON") {
        Value::Object(map) => map,
        // Parameters are always structs; nothing else reaches here.
        _ => Map::new(),
    }
}

/// An empty request body (signed requests still carry the nonce)
pub(crate) fn empty_body() -> Map<String, Value> {
    Map::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_market_lowercases() {
        assert_eq!(normalize_market("USDT"), "usdt");
        assert_eq!(normalize_market("aud"), "aud");
    }

    #[test]
    fn test_body_of_skips_absent_options() {
        #[derive(Serialize)]
        struct Params {
            cointype: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            markettype: Option<String>,
        }

        let body = body_of(&Params { cointype: "BTC".to_string(), markettype: None });
        assert_eq!(body.len(), 1);
        assert!(body.contains_key("cointype"));
    }
}
