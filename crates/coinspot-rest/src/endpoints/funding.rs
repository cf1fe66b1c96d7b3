//! Funding endpoints: deposit addresses and withdrawals
//!
//! These endpoints require a full-access credential.

use serde_json::Map;
use tracing::{debug, instrument};

use crate::auth::{signed_payload, Credential, NonceFactory};
use crate::endpoints::{body_of, empty_body};
use crate::error::RestResult;
use crate::transport::Transport;
use crate::types::{DepositAddress, StatusMessage, WithdrawDetails, WithdrawParams};

/// Full-access funding endpoints
pub struct FundingEndpoints<'a> {
    transport: &'a Transport,
    base_url: &'a str,
    credential: &'a Credential,
    nonce_factory: &'a NonceFactory,
}

impl<'a> FundingEndpoints<'a> {
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

    /// Deposit addresses for a coin, one per supported network
    #[instrument(skip(self))]
    pub async fn deposit_address(&self, cointype: &str) -> RestResult<DepositAddress> {
        let mut body = empty_body();
        body.insert("cointype".to_string(), cointype.into());
        self.post("/my/coin/deposit", body).await
    }

    /// Fees and minimums for withdrawing a coin
    #[instrument(skip(self))]
    pub async fn withdraw_details(&self, cointype: &str) -> RestResult<WithdrawDetails> {
        let mut body = empty_body();
        body.insert("cointype".to_string(), cointype.into());
        self.post("/my/coin/withdraw/senddetails", body).await
    }

    /// Send coins to an external address
    #[instrument(skip(self, params), fields(cointype = %params.cointype))]
    pub async fn withdraw(&self, params: WithdrawParams) -> RestResult<StatusMessage> {
        self.post("/my/coin/withdraw/send", body_of(&params)).await
    }
}
