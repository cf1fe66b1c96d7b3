//! REST API client for the CoinSpot cryptocurrency exchange
//!
//! This crate provides a typed client for CoinSpot's v2 REST API:
//! public market data plus the authenticated full-access (trading,
//! funding) and read-only (account, history) tiers.
//!
//! # Request pipeline
//!
//! Every call flows through one [`transport::Transport`]:
//!
//! - **Rate limiting** — outbound request starts are bounded to a rolling
//!   window (995/minute by default) with strictly FIFO admission.
//! - **Retries** — transient failures (5xx, 429, network errors) are
//!   retried with bounded exponential backoff; schema mismatches and
//!   other client errors fail immediately.
//! - **Validation** — every 2xx body is validated against the typed
//!   response shape; mismatches surface as [`RestError::Schema`] carrying
//!   the raw payload.
//!
//! # Authentication
//!
//! Private endpoints sign the exact JSON request body (nonce first) with
//! HMAC-SHA512, hex encoded, as specified by CoinSpot's API
//! documentation. Missing credentials are reported eagerly, before any
//! request is scheduled.
//!
//! # Example
//!
//! ```no_run
//! use coinspot_rest::{CoinspotClient, Credential};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = CoinspotClient::new();
//!     let depth = client.public().depth("BTC").await?;
//!     println!("best ask: {:?}", depth.sellorders.first());
//!
//!     // Private endpoints (auth required)
//!     let creds = Credential::new("api-key", "api-secret");
//!     let auth_client = CoinspotClient::with_full_access(creds);
//!     let balances = auth_client.account()?.balances().await?;
//!     println!("balances: {:?}", balances.balances.len());
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod de;
pub mod endpoints;
pub mod error;
pub mod rate_limit;
pub mod transport;
pub mod types;

// Re-export main types
pub use auth::{Credential, NonceFactory};
pub use client::{BaseUrls, ClientConfig, CoinspotClient};
pub use error::{AccessTier, RestError, RestResult, SchemaIssue};
pub use rate_limit::{RateLimitConfig, RateLimiter};
pub use transport::{RetryConfig, Transport};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    AggTrades, AvgPrice, Depth, OrderbookEntry, PricePoint, Ticker24hr, Ticker24hrSymbol, Trades,
    // Trading
    AmountType, LimitOrderParams, MarketExecution, MarketOrderParams, OrderQuote, PlacedOrder,
    SwapParams, UpdateOrderParams, UpdatedOrder,
    // Funding
    DepositAddress, WithdrawDetails, WithdrawParams,
    // Account
    AccountBalances, AccountStatus, AssetBalance, BalanceEntry, MarketOrderHistory,
    OpenLimitOrders, OpenMarketOrders, StatusMessage, TransferHistory,
};
