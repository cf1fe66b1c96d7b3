//! Trading endpoints: quotes, limit orders, market executions
//!
//! These endpoints require a full-access credential.

use rust_decimal::Decimal;
use serde_json::Map;
use tracing::{debug, instrument};

use crate::auth::{signed_payload, Credential, NonceFactory};
use crate::endpoints::{body_of, empty_body, normalize_market};
use crate::error::RestResult;
use crate::transport::Transport;
use crate::types::{
    AccountStatus, AmountType, LimitOrderParams, MarketExecution, MarketOrderParams, OrderQuote,
    PlacedOrder, QuoteParams, StatusMessage, SwapParams, SwapQuoteParams, UpdateOrderParams,
    UpdatedOrder,
};

/// Full-access trading endpoints
pub struct TradingEndpoints<'a> {
    transport: &'a Transport,
    base_url: &'a str,
    credential: &'a Credential,
    nonce_factory: &'a NonceFactory,
}

impl<'a> TradingEndpoints<'a> {
    pub(crate) fn new(
        transport: &'a Transport,
        base_url: &'a str,
        credential: &'a Credential,
        nonce_factory: &'a NonceFactory,
    ) -> Self {
        Self { transport, base_url, credential, nonce_factory }
    }

    /// Make a signed POST request
    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: Map<String, serde_json::Value>,
    ) -> RestResult<T> {
        let nonce = (self.nonce_factory)();
        let signed = signed_payload(self.credential, nonce, body);
        let url = format!("{}{}", self.base_url, path);

        debug!("Making authenticated request to {}", path);

        self.transport
            .post(&url, &signed.payload, &[("key", signed.key), ("sign", signed.sign)])
            .await
    }

    /// Check that the full-access key is valid
    #[instrument(skip(self))]
    pub async fn status(&self) -> RestResult<AccountStatus> {
        self.post("/status", empty_body()).await
    }

    /// Quote an instant buy
    #[instrument(skip(self))]
    pub async fn quote_buy(
        &self,
        cointype: &str,
        amount: Decimal,
        amounttype: AmountType,
    ) -> RestResult<OrderQuote> {
        let params =
            QuoteParams { cointype: cointype.to_string(), amount, amounttype };
        self.post("/quote/buy/now", body_of(&params)).await
    }

    /// Quote an instant sell
    #[instrument(skip(self))]
    pub async fn quote_sell(
        &self,
        cointype: &str,
        amount: Decimal,
        amounttype: AmountType,
    ) -> RestResult<OrderQuote> {
        let params =
            QuoteParams { cointype: cointype.to_string(), amount, amounttype };
        self.post("/quote/sell/now", body_of(&params)).await
    }

    /// Quote an instant coin-to-coin swap
    #[instrument(skip(self))]
    pub async fn quote_swap(
        &self,
        cointypesell: &str,
        cointypebuy: &str,
        amount: Decimal,
    ) -> RestResult<OrderQuote> {
        let params = SwapQuoteParams {
            cointypesell: cointypesell.to_string(),
            cointypebuy: cointypebuy.to_string(),
            amount,
        };
        self.post("/quote/swap/now", body_of(&params)).await
    }

    /// Place a limit buy order
    #[instrument(skip(self, params), fields(cointype = %params.cointype))]
    pub async fn place_buy_order(&self, mut params: LimitOrderParams) -> RestResult<PlacedOrder> {
        params.markettype = params.markettype.as_deref().map(normalize_market);
        self.post("/my/buy", body_of(&params)).await
    }

    /// Update an open limit buy order
    #[instrument(skip(self, params), fields(id = %params.id))]
    pub async fn update_buy_order(&self, mut params: UpdateOrderParams) -> RestResult<UpdatedOrder> {
        params.markettype = params.markettype.as_deref().map(normalize_market);
        self.post("/my/buy/edit", body_of(&params)).await
    }

    /// Execute a market buy immediately
    #[instrument(skip(self, params), fields(cointype = %params.cointype))]
    pub async fn market_buy_now(&self, params: MarketOrderParams) -> RestResult<MarketExecution> {
        self.post("/my/buy/now", body_of(&params)).await
    }

    /// Place a limit sell order
    #[instrument(skip(self, params), fields(cointype = %params.cointype))]
    pub async fn place_sell_order(&self, mut params: LimitOrderParams) -> RestResult<PlacedOrder> {
        params.markettype = params.markettype.as_deref().map(normalize_market);
        self.post("/my/sell", body_of(&params)).await
    }

    /// Update an open limit sell order
    #[instrument(skip(self, params), fields(id = %params.id))]
    pub async fn update_sell_order(
        &self,
        mut params: UpdateOrderParams,
    ) -> RestResult<UpdatedOrder> {
        params.markettype = params.markettype.as_deref().map(normalize_market);
        self.post("/my/sell/edit", body_of(&params)).await
    }

    /// Execute a market sell immediately
    #[instrument(skip(self, params), fields(cointype = %params.cointype))]
    pub async fn market_sell_now(&self, params: MarketOrderParams) -> RestResult<MarketExecution> {
        self.post("/my/sell/now", body_of(&params)).await
    }

    /// Execute a coin-to-coin swap immediately
    #[instrument(skip(self, params), fields(sell = %params.cointypesell, buy = %params.cointypebuy))]
    pub async fn swap_now(&self, params: SwapParams) -> RestResult<MarketExecution> {
        self.post("/my/swap/now", body_of(&params)).await
    }

    /// Cancel an open buy order by id
    #[instrument(skip(self))]
    pub async fn cancel_buy_order(&self, id: &str) -> RestResult<StatusMessage> {
        let mut body = empty_body();
        body.insert("id".to_string(), id.into());
        self.post("/my/buy/cancel", body).await
    }

    /// Cancel all open buy orders, optionally for one coin
    #[instrument(skip(self))]
    pub async fn cancel_all_buy_orders(&self, coin: Option<&str>) -> RestResult<StatusMessage> {
        let mut body = empty_body();
        if let Some(coin) = coin {
            body.insert("coin".to_string(), coin.into());
        }
        self.post("/my/buy/cancel/all", body).await
    }

    /// Cancel an open sell order by id
    #[instrument(skip(self))]
    pub async fn cancel_sell_order(&self, id: &str) -> RestResult<StatusMessage> {
        let mut body = empty_body();
        body.insert("id".to_string(), id.into());
        self.post("/my/sell/cancel", body).await
    }

    /// Cancel all open sell orders, optionally for one coin
    #[instrument(skip(self))]
    pub async fn cancel_all_sell_orders(&self, coin: Option<&str>) -> RestResult<StatusMessage> {
        let mut body = empty_body();
        if let Some(coin) = coin {
            body.insert("coin".to_string(), coin.into());
        }
        self.post("/my/sell/cancel/all", body).await
    }
}
