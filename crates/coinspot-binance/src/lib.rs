//! Binance-compatible views over CoinSpot REST responses
//!
//! Adapters written against Binance's wire format can consume CoinSpot
//! data through these converters. The mapping is lossy by nature:
//! CoinSpot has no update ids, no maker flags, and no stable trade ids,
//! so those fields are synthesized (see each converter for the rules).
//!
//! Converters are pure: callers supply the clock (`now_ms`) and the
//! synthetic `last_update_id` instead of the library reading the system
//! time.
//!
//! # Example
//!
//! ```no_run
//! use coinspot_binance::to_depth;
//! use coinspot_rest::CoinspotClient;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CoinspotClient::new();
//! let native = client.public().depth("BTC").await?;
//! let depth = to_depth(&native, 1);
//! println!("{} bids", depth.bids.len());
//! # Ok(())
//! # }
//! ```

mod convert;
mod types;

pub use convert::{to_agg_trades, to_balances, to_depth, to_trades};
pub use types::{AggTrade, Balance, Depth, Trade};
