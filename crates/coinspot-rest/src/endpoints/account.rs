//! Read-only account endpoints
//!
//! These endpoints accept a read-only credential (a full-access
//! credential also works; the client falls back to it automatically).

use serde_json::Map;
use tracing::{debug, instrument};

use crate::auth::{signed_payload, Credential, NonceFactory};
use crate::endpoints::{body_of, empty_body, normalize_market};
use crate::error::RestResult;
use crate::transport::Transport;
use crate::types::{
    AccountBalances, AccountStatus, AffiliatePayments, AssetBalance, DateRangeParams, Depth,
    FiatDepositHistory, FiatWithdrawalHistory, MarketOrderHistory, MarketQueryParams,
    MarketTradesParams, OpenLimitOrders, OpenMarketOrders, OpenOrdersParams, OrderHistoryParams,
    ReferralPayments, TransferHistory,
};

/// Read-only account endpoints
pub struct AccountEndpoints<'a> {
    transport: &'a Transport,
    base_url: &'a str,
    credential: &'a Credential,
    nonce_factory: &'a NonceFactory,
}

impl<'a> AccountEndpoints<'a> {
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
        path_and_query: &str,
        body: Map<String, serde_json::Value>,
    ) -> RestResult<T> {
        let nonce = (self.nonce_factory)();
        let signed = signed_payload(self.credential, nonce, body);
        let url = format!("{}{}", self.base_url, path_and_query);

        debug!("Making authenticated request to {}", path_and_query);

        self.transport
            .post(&url, &signed.payload, &[("key", signed.key), ("sign", signed.sign)])
            .await
    }

    /// Check that the read-only key is valid
    #[instrument(skip(self))]
    pub async fn status(&self) -> RestResult<AccountStatus> {
        self.post("/status", empty_body()).await
    }

    /// Open orders for a market (authenticated view of the public book)
    #[instrument(skip(self, params), fields(cointype = %params.cointype))]
    pub async fn market_depth(&self, mut params: MarketQueryParams) -> RestResult<Depth> {
        params.markettype = params.markettype.as_deref().map(normalize_market);
        self.post("/orders/market/open", body_of(&params)).await
    }

    /// Completed orders for a market, with AUD fee breakdown
    #[instrument(skip(self, params), fields(cointype = %params.cointype))]
    pub async fn market_trades(
        &self,
        mut params: MarketTradesParams,
    ) -> RestResult<MarketOrderHistory> {
        params.markettype = params.markettype.as_deref().map(normalize_market);
        self.post("/orders/market/completed", body_of(&params)).await
    }

    /// Balances for every asset on the account
    #[instrument(skip(self))]
    pub async fn balances(&self) -> RestResult<AccountBalances> {
        self.post("/my/balances", empty_body()).await
    }

    /// Balance for a single asset
    ///
    /// When `available` is set the response reports the tradeable balance
    /// rather than the total.
    #[instrument(skip(self))]
    pub async fn asset_balance(
        &self,
        cointype: &str,
        available: Option<bool>,
    ) -> RestResult<AssetBalance> {
        let query = match available {
            Some(true) => "?available=yes",
            Some(false) => "?available=no",
            None => "",
        };
        let path = format!("/my/balance/{}{}", urlencoding::encode(cointype), query);
        self.post(&path, empty_body()).await
    }

    /// Open market orders placed by this account
    #[instrument(skip(self, params))]
    pub async fn open_market_orders(
        &self,
        mut params: OpenOrdersParams,
    ) -> RestResult<OpenMarketOrders> {
        params.markettype = params.markettype.as_deref().map(normalize_market);
        self.post("/my/orders/market/open", body_of(&params)).await
    }

    /// Open limit orders placed by this account
    #[instrument(skip(self))]
    pub async fn open_limit_orders(&self, cointype: Option<&str>) -> RestResult<OpenLimitOrders> {
        let mut body = empty_body();
        if let Some(cointype) = cointype {
            body.insert("cointype".to_string(), cointype.into());
        }
        self.post("/my/orders/limit/open", body).await
    }

    /// Completed orders placed by this account
    #[instrument(skip(self, params))]
    pub async fn all_orders(
        &self,
        mut params: OrderHistoryParams,
    ) -> RestResult<MarketOrderHistory> {
        params.markettype = params.markettype.as_deref().map(normalize_market);
        self.post("/my/orders/completed", body_of(&params)).await
    }

    /// Completed market orders placed by this account
    #[instrument(skip(self, params))]
    pub async fn all_market_orders(
        &self,
        mut params: OrderHistoryParams,
    ) -> RestResult<MarketOrderHistory> {
        params.markettype = params.markettype.as_deref().map(normalize_market);
        self.post("/my/orders/market/completed", body_of(&params)).await
    }

    /// Coin send and receive history
    #[instrument(skip(self, params))]
    pub async fn transfer_history(&self, params: DateRangeParams) -> RestResult<TransferHistory> {
        self.post("/my/sendreceive", body_of(&params)).await
    }

    /// AUD deposit history
    #[instrument(skip(self, params))]
    pub async fn fiat_deposit_history(
        &self,
        params: DateRangeParams,
    ) -> RestResult<FiatDepositHistory> {
        self.post("/my/deposits", body_of(&params)).await
    }

    /// AUD withdrawal history
    #[instrument(skip(self, params))]
    pub async fn fiat_withdrawal_history(
        &self,
        params: DateRangeParams,
    ) -> RestResult<FiatWithdrawalHistory> {
        self.post("/my/withdrawals", body_of(&params)).await
    }

    /// Affiliate payments received
    #[instrument(skip(self))]
    pub async fn affiliate_payments(&self) -> RestResult<AffiliatePayments> {
        self.post("/my/affiliatepayments", empty_body()).await
    }

    /// Referral payments received
    #[instrument(skip(self))]
    pub async fn referral_payments(&self) -> RestResult<ReferralPayments> {
        self.post("/my/referralpayments", empty_body()).await
    }
}
