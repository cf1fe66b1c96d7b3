//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use tracing::{debug, instrument};

use crate::endpoints::normalize_market;
use crate::error::RestResult;
use crate::transport::Transport;
use crate::types::{AggTrades, AvgPrice, Depth, Ticker24hr, Ticker24hrSymbol, Trades};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    transport: &'a Transport,
    base_url: &'a str,
}

impl<'a> MarketEndpoints<'a> {
    pub(crate) fn new(transport: &'a Transport, base_url: &'a str) -> Self {
        Self { transport, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn coin_path(&self, prefix: &str, cointype: &str) -> String {
        self.url(&format!("{}/{}", prefix, urlencoding::encode(cointype)))
    }

    fn market_path(&self, prefix: &str, cointype: &str, markettype: &str) -> String {
        self.url(&format!(
            "{}/{}/{}",
            prefix,
            urlencoding::encode(cointype),
            urlencoding::encode(&normalize_market(markettype))
        ))
    }

    /// Latest prices for all markets
    #[instrument(skip(self))]
    pub async fn ticker24hr(&self) -> RestResult<Ticker24hr> {
        debug!("Fetching latest prices");
        self.transport.get(&self.url("/latest")).await
    }

    /// Latest prices for one coin (AUD market)
    #[instrument(skip(self))]
    pub async fn ticker24hr_for_symbol(&self, cointype: &str) -> RestResult<Ticker24hrSymbol> {
        self.transport.get(&self.coin_path("/latest", cointype)).await
    }

    /// Latest prices for one coin in a specific market currency
    #[instrument(skip(self))]
    pub async fn ticker24hr_for_market(
        &self,
        cointype: &str,
        markettype: &str,
    ) -> RestResult<Ticker24hrSymbol> {
        self.transport.get(&self.market_path("/latest", cointype, markettype)).await
    }

    /// Current buy price for a coin (AUD market)
    #[instrument(skip(self))]
    pub async fn avg_price(&self, cointype: &str) -> RestResult<AvgPrice> {
        self.transport.get(&self.coin_path("/buyprice", cointype)).await
    }

    /// Current buy price for a coin in a specific market currency
    #[instrument(skip(self))]
    pub async fn avg_price_for_market(
        &self,
        cointype: &str,
        markettype: &str,
    ) -> RestResult<AvgPrice> {
        self.transport.get(&self.market_path("/buyprice", cointype, markettype)).await
    }

    /// Current sell price for a coin — the bid side of the book
    #[instrument(skip(self))]
    pub async fn book_ticker_bid(&self, cointype: &str) -> RestResult<AvgPrice> {
        self.transport.get(&self.coin_path("/sellprice", cointype)).await
    }

    /// Current sell price for a coin in a specific market currency
    #[instrument(skip(self))]
    pub async fn book_ticker_bid_for_market(
        &self,
        cointype: &str,
        markettype: &str,
    ) -> RestResult<AvgPrice> {
        self.transport.get(&self.market_path("/sellprice", cointype, markettype)).await
    }

    /// Open orders for a coin (AUD market)
    #[instrument(skip(self))]
    pub async fn depth(&self, cointype: &str) -> RestResult<Depth> {
        debug!("Fetching order book for {}", cointype);
        self.transport.get(&self.coin_path("/orders/open", cointype)).await
    }

    /// Open orders for a coin in a specific market currency
    #[instrument(skip(self))]
    pub async fn depth_for_market(&self, cointype: &str, markettype: &str) -> RestResult<Depth> {
        self.transport.get(&self.market_path("/orders/open", cointype, markettype)).await
    }

    /// Recently completed orders for a coin (AUD market)
    #[instrument(skip(self))]
    pub async fn trades(&self, cointype: &str) -> RestResult<Trades> {
        self.transport.get(&self.coin_path("/orders/completed", cointype)).await
    }

    /// Recently completed orders for a coin in a specific market currency
    #[instrument(skip(self))]
    pub async fn trades_for_market(&self, cointype: &str, markettype: &str) -> RestResult<Trades> {
        self.transport.get(&self.market_path("/orders/completed", cointype, markettype)).await
    }

    /// Completed-order summary for a coin (AUD market)
    #[instrument(skip(self))]
    pub async fn agg_trades(&self, cointype: &str) -> RestResult<AggTrades> {
        self.transport.get(&self.coin_path("/orders/summary/completed", cointype)).await
    }

    /// Completed-order summary for a coin in a specific market currency
    #[instrument(skip(self))]
    pub async fn agg_trades_for_market(
        &self,
        cointype: &str,
        markettype: &str,
    ) -> RestResult<AggTrades> {
        self.transport
            .get(&self.market_path("/orders/summary/completed", cointype, markettype))
            .await
    }
}
