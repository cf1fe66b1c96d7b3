//! Types for CoinSpot REST API requests and responses
//!
//! Response shapes mirror the v2 API documentation. Money fields use
//! [`Decimal`]; nullable ones go through the lenient deserializers in
//! [`crate::de`] because CoinSpot reports unavailable numbers as the
//! string `"NaN"`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::de;

// ============================================================================
// Status Envelope
// ============================================================================

/// Bare acknowledgement returned by the status endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AccountStatus {
    /// "ok" or "error"
    pub status: String,
}

/// Acknowledgement with an optional server message
///
/// Returned by cancel and withdraw operations, which carry no payload
/// beyond the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusMessage {
    /// "ok" or "error"
    pub status: String,
    /// Details when status is "error"
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Bid/ask/last snapshot for one market
#[derive(Debug, Clone, Deserialize)]
pub struct PricePoint {
    /// Best bid, absent for illiquid markets
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub bid: Option<Decimal>,
    /// Best ask, absent for illiquid markets
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub ask: Option<Decimal>,
    /// Last traded price
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub last: Option<Decimal>,
}

/// Latest prices for every market
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker24hr {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    /// Prices keyed by coin symbol
    pub prices: HashMap<String, PricePoint>,
}

/// Latest prices for a single market
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker24hrSymbol {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub prices: PricePoint,
}

/// Current buy or sell price for one market
#[derive(Debug, Clone, Deserialize)]
pub struct AvgPrice {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    /// Quoted rate, `None` when the market has no liquidity
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub rate: Option<Decimal>,
    /// Market identifier, e.g. "BTC/AUD"
    pub market: String,
}

/// One resting order in the public order book
#[derive(Debug, Clone, Deserialize)]
pub struct OrderbookEntry {
    pub amount: Decimal,
    pub rate: Decimal,
    pub total: Decimal,
    pub coin: String,
    #[serde(default)]
    pub market: Option<String>,
}

/// Open buy and sell orders for a market
#[derive(Debug, Clone, Deserialize)]
pub struct Depth {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub buyorders: Vec<OrderbookEntry>,
    pub sellorders: Vec<OrderbookEntry>,
}

/// A completed order in the public trade history
#[derive(Debug, Clone, Deserialize)]
pub struct CompletedOrder {
    pub amount: Decimal,
    pub rate: Decimal,
    pub total: Decimal,
    pub coin: String,
    #[serde(default)]
    pub market: Option<String>,
    /// Settlement time, RFC 3339
    #[serde(default)]
    pub solddate: Option<String>,
}

/// Recently completed buy and sell orders for a market
#[derive(Debug, Clone, Deserialize)]
pub struct Trades {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub buyorders: Vec<CompletedOrder>,
    pub sellorders: Vec<CompletedOrder>,
}

/// Completed-order summary (both sides merged)
#[derive(Debug, Clone, Deserialize)]
pub struct AggTrades {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub orders: Vec<CompletedOrder>,
}

/// A completed order with AUD fee breakdown (read-only tier)
#[derive(Debug, Clone, Deserialize)]
pub struct CompletedOrderWithFees {
    pub amount: Decimal,
    pub rate: Decimal,
    pub total: Decimal,
    pub coin: String,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub solddate: Option<String>,
    /// Fee excluding GST, in AUD
    #[serde(default, rename = "audfeeExGst", deserialize_with = "de::decimal_opt")]
    pub audfee_ex_gst: Option<Decimal>,
    /// GST component, in AUD
    #[serde(default, rename = "audGst", deserialize_with = "de::decimal_opt")]
    pub aud_gst: Option<Decimal>,
    /// Total including fees, in AUD
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub audtotal: Option<Decimal>,
    /// "buy", "sell", etc.
    #[serde(default, rename = "type")]
    pub order_type: Option<String>,
    /// Whether this was an over-the-counter trade
    #[serde(default)]
    pub otc: Option<bool>,
}

/// Completed orders with fees, split by side
#[derive(Debug, Clone, Deserialize)]
pub struct MarketOrderHistory {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub buyorders: Vec<CompletedOrderWithFees>,
    pub sellorders: Vec<CompletedOrderWithFees>,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Instant buy/sell/swap quote
#[derive(Debug, Clone, Deserialize)]
pub struct OrderQuote {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub rate: Decimal,
}

/// Acknowledgement of a placed limit order
#[derive(Debug, Clone, Deserialize)]
pub struct PlacedOrder {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub coin: String,
    pub market: String,
    pub amount: Decimal,
    pub rate: Decimal,
    /// Order id, needed to cancel or update
    pub id: String,
}

/// Acknowledgement of an updated limit order
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatedOrder {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub id: String,
    pub coin: String,
    pub rate: Decimal,
    pub newrate: Decimal,
    pub amount: Decimal,
    pub total: Decimal,
    pub updated: bool,
}

/// Result of a market buy/sell/swap execution
#[derive(Debug, Clone, Deserialize)]
pub struct MarketExecution {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub coin: String,
    pub amount: Decimal,
    pub market: String,
    pub total: Decimal,
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub rate: Option<Decimal>,
}

// ============================================================================
// Funding Types
// ============================================================================

/// Deposit address for one network
#[derive(Debug, Clone, Deserialize)]
pub struct DepositNetwork {
    pub name: String,
    pub network: String,
    pub address: String,
    #[serde(default)]
    pub memo: Option<String>,
}

/// Deposit addresses for a coin
#[derive(Debug, Clone, Deserialize)]
pub struct DepositAddress {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub networks: Vec<DepositNetwork>,
}

/// Withdrawal constraints for one network
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawNetwork {
    pub network: String,
    #[serde(default)]
    pub paymentid: Option<String>,
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub fee: Option<Decimal>,
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub minsend: Option<Decimal>,
    #[serde(default, rename = "default")]
    pub is_default: Option<bool>,
}

/// Withdrawal details for a coin
#[derive(Debug, Clone, Deserialize)]
pub struct WithdrawDetails {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub networks: Vec<WithdrawNetwork>,
}

// ============================================================================
// Account Types (read-only tier)
// ============================================================================

/// Balance snapshot for one asset
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceEntry {
    /// Total balance, including amounts held in open orders
    pub balance: Decimal,
    /// Amount free to trade or withdraw
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub available: Option<Decimal>,
    /// AUD value at current rates
    pub audbalance: Decimal,
    /// Current AUD rate for the asset
    pub rate: Decimal,
}

/// All balances (one single-key map per asset, as the API ships them)
#[derive(Debug, Clone, Deserialize)]
pub struct AccountBalances {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub balances: Vec<HashMap<String, BalanceEntry>>,
}

/// Balance for a single asset
#[derive(Debug, Clone, Deserialize)]
pub struct AssetBalance {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub balance: HashMap<String, BalanceEntry>,
}

/// An open market order
#[derive(Debug, Clone, Deserialize)]
pub struct OpenMarketOrder {
    pub id: String,
    pub coin: String,
    pub market: String,
    pub amount: Decimal,
    pub created: String,
    pub rate: Decimal,
    pub total: Decimal,
}

/// Open market orders, split by side
#[derive(Debug, Clone, Deserialize)]
pub struct OpenMarketOrders {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub buyorders: Vec<OpenMarketOrder>,
    pub sellorders: Vec<OpenMarketOrder>,
}

/// An open limit order
#[derive(Debug, Clone, Deserialize)]
pub struct OpenLimitOrder {
    pub id: String,
    pub coin: String,
    pub market: String,
    pub rate: Decimal,
    pub amount: Decimal,
    pub created: String,
    #[serde(rename = "type")]
    pub order_type: String,
}

/// Open limit orders, split by side
#[derive(Debug, Clone, Deserialize)]
pub struct OpenLimitOrders {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub buyorders: Vec<OpenLimitOrder>,
    pub sellorders: Vec<OpenLimitOrder>,
}

/// An outbound coin transfer
#[derive(Debug, Clone, Deserialize)]
pub struct SendTransaction {
    pub timestamp: String,
    pub amount: Decimal,
    pub coin: String,
    pub address: String,
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub aud: Option<Decimal>,
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub sendfee: Option<Decimal>,
}

/// An inbound coin transfer
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiveTransaction {
    pub timestamp: String,
    pub amount: Decimal,
    pub coin: String,
    pub address: String,
    #[serde(default, deserialize_with = "de::decimal_opt")]
    pub aud: Option<Decimal>,
    #[serde(default)]
    pub from: Option<String>,
}

/// Coin send/receive history
#[derive(Debug, Clone, Deserialize)]
pub struct TransferHistory {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub sendtransactions: Vec<SendTransaction>,
    pub receivetransactions: Vec<ReceiveTransaction>,
}

/// One AUD deposit
#[derive(Debug, Clone, Deserialize)]
pub struct FiatDeposit {
    pub amount: Decimal,
    pub created: String,
    pub status: String,
    #[serde(rename = "type")]
    pub deposit_type: String,
    pub reference: String,
}

/// AUD deposit history
#[derive(Debug, Clone, Deserialize)]
pub struct FiatDepositHistory {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub deposits: Vec<FiatDeposit>,
}

/// One AUD withdrawal
#[derive(Debug, Clone, Deserialize)]
pub struct FiatWithdrawal {
    pub amount: Decimal,
    pub created: String,
    pub status: String,
}

/// AUD withdrawal history
#[derive(Debug, Clone, Deserialize)]
pub struct FiatWithdrawalHistory {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub withdrawals: Vec<FiatWithdrawal>,
}

/// One affiliate payment
#[derive(Debug, Clone, Deserialize)]
pub struct AffiliatePayment {
    pub amount: Decimal,
    pub month: String,
}

/// Affiliate payments received
#[derive(Debug, Clone, Deserialize)]
pub struct AffiliatePayments {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub payments: Vec<AffiliatePayment>,
}

/// One referral payment
#[derive(Debug, Clone, Deserialize)]
pub struct ReferralPayment {
    pub amount: Decimal,
    pub coin: String,
    pub audamount: Decimal,
    pub timestamp: String,
}

/// Referral payments received
#[derive(Debug, Clone, Deserialize)]
pub struct ReferralPayments {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub payments: Vec<ReferralPayment>,
}

// ============================================================================
// Request Parameters
// ============================================================================

/// How a market order amount is denominated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountType {
    /// Amount is in the coin being traded
    Coin,
    /// Amount is in Australian dollars
    Aud,
}

/// Direction a rate threshold protects against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThresholdDirection {
    Up,
    Down,
    Both,
}

/// Whether a withdrawal requires email confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmailConfirm {
    Yes,
    No,
}

/// Parameters for an instant buy or sell quote
#[derive(Debug, Clone, Serialize)]
pub struct QuoteParams {
    pub cointype: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Denomination of `amount`
    pub amounttype: AmountType,
}

/// Parameters for an instant swap quote
#[derive(Debug, Clone, Serialize)]
pub struct SwapQuoteParams {
    pub cointypesell: String,
    pub cointypebuy: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Parameters for placing a limit buy or sell order
#[derive(Debug, Clone, Serialize)]
pub struct LimitOrderParams {
    /// Coin symbol, e.g. "BTC"
    pub cointype: String,
    /// Amount of coin to trade
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Limit rate in the market currency
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    /// Market currency, defaults to AUD server-side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markettype: Option<String>,
}

/// Parameters for updating an open limit order
#[derive(Debug, Clone, Serialize)]
pub struct UpdateOrderParams {
    pub cointype: String,
    /// Id of the order to update
    pub id: String,
    /// Current rate of the order
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    /// Replacement rate
    #[serde(with = "rust_decimal::serde::float")]
    pub newrate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markettype: Option<String>,
}

/// Parameters for an immediate market buy or sell
#[derive(Debug, Clone, Serialize)]
pub struct MarketOrderParams {
    pub cointype: String,
    /// Denomination of `amount`
    pub amounttype: AmountType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Optional rate guard
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub rate: Option<Decimal>,
    /// Allowed slippage from `rate`, in percent
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub threshold: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<ThresholdDirection>,
}

/// Parameters for an immediate coin-to-coin swap
#[derive(Debug, Clone, Serialize)]
pub struct SwapParams {
    /// Coin to sell
    pub cointypesell: String,
    /// Coin to buy
    pub cointypebuy: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", with = "rust_decimal::serde::float_option")]
    pub threshold: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<ThresholdDirection>,
}

/// Parameters for sending coins to an external address
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawParams {
    pub cointype: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Destination address
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emailconfirm: Option<EmailConfirm>,
    /// Network to send over, e.g. "BTC", "ERC20"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Memo/payment id for networks that need one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paymentid: Option<String>,
}

/// Market filter for read-only depth and trade queries
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarketQueryParams {
    pub cointype: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markettype: Option<String>,
}

/// Filter for read-only completed-trade queries
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarketTradesParams {
    pub cointype: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markettype: Option<String>,
    /// Inclusive start, "YYYY-MM-DD" or epoch millis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enddate: Option<String>,
    /// Maximum rows (server caps at 500)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Filter for open-order queries
#[derive(Debug, Clone, Default, Serialize)]
pub struct OpenOrdersParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cointype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markettype: Option<String>,
}

/// Filter for completed-order queries
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderHistoryParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cointype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markettype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enddate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Date range for history queries
#[derive(Debug, Clone, Default, Serialize)]
pub struct DateRangeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enddate: Option<String>,
}
