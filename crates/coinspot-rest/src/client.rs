//! Main REST client implementation

use std::time::Duration;

use reqwest::Client;
use tracing::info;

use crate::auth::{default_nonce_factory, Credential, NonceFactory};
use crate::endpoints::{AccountEndpoints, FundingEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{AccessTier, RestError, RestResult};
use crate::rate_limit::{RateLimitConfig, RateLimiter};
use crate::transport::{RetryConfig, Transport};

/// Default per-attempt request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default user agent
const DEFAULT_USER_AGENT: &str = concat!("coinspot-rest/", env!("CARGO_PKG_VERSION"));

/// Base URLs for the three API tiers
#[derive(Debug, Clone)]
pub struct BaseUrls {
    /// Public market data
    pub public: String,
    /// Full-access (trading, funding)
    pub private: String,
    /// Read-only account data
    pub read_only: String,
}

impl Default for BaseUrls {
    fn default() -> Self {
        Self {
            public: "https://www.coinspot.com.au/pubapi/v2".to_string(),
            private: "https://www.coinspot.com.au/api/v2".to_string(),
            read_only: "https://www.coinspot.com.au/api/v2/ro".to_string(),
        }
    }
}

/// CoinSpot REST API client
///
/// Provides access to the public, full-access, and read-only tiers of
/// the v2 API through one shared request pipeline (rate limiting, retry
/// with backoff, response validation).
///
/// # Example
///
/// ```no_run
/// use coinspot_rest::{CoinspotClient, Credential};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = CoinspotClient::new();
///     let ticker = client.public().ticker24hr().await?;
///
///     // With credentials for the authenticated tiers
///     let creds = Credential::new("api-key", "api-secret");
///     let auth_client = CoinspotClient::with_full_access(creds);
///     let balances = auth_client.account()?.balances().await?;
///
///     Ok(())
/// }
/// ```
pub struct CoinspotClient {
    transport: Transport,
    base_urls: BaseUrls,
    nonce_factory: NonceFactory,
    full_access: Option<Credential>,
    read_only: Option<Credential>,
}

impl CoinspotClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with a full-access credential
    ///
    /// The read-only tier falls back to the full-access credential, so
    /// all endpoints are available.
    pub fn with_full_access(credential: Credential) -> Self {
        Self::with_config(ClientConfig::default().with_full_access(credential))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .build()
            .expect("Failed to create HTTP client");

        let limiter = RateLimiter::new(config.rate_limit);
        let transport = Transport::new(http, limiter, config.retries);

        info!("Created CoinSpot REST client");

        Self {
            transport,
            base_urls: config.base_urls,
            nonce_factory: config.nonce_factory.unwrap_or_else(default_nonce_factory),
            full_access: config.full_access,
            read_only: config.read_only,
        }
    }

    /// Check if the client can reach the full-access tier
    pub fn has_full_access(&self) -> bool {
        self.full_access.is_some()
    }

    /// Check if the client can reach the read-only tier
    pub fn has_read_only(&self) -> bool {
        self.read_only.is_some() || self.full_access.is_some()
    }

    // ========================================================================
    // Tier Accessors
    // ========================================================================

    /// Public market data endpoints
    pub fn public(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.transport, &self.base_urls.public)
    }

    /// Full-access trading endpoints (requires a full-access credential)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        let credential = self
            .full_access
            .as_ref()
            .ok_or(RestError::MissingCredential { tier: AccessTier::FullAccess })?;
        Ok(TradingEndpoints::new(
            &self.transport,
            &self.base_urls.private,
            credential,
            &self.nonce_factory,
        ))
    }

    /// Full-access funding endpoints (requires a full-access credential)
    pub fn funding(&self) -> RestResult<FundingEndpoints<'_>> {
        let credential = self
            .full_access
            .as_ref()
            .ok_or(RestError::MissingCredential { tier: AccessTier::FullAccess })?;
        Ok(FundingEndpoints::new(
            &self.transport,
            &self.base_urls.private,
            credential,
            &self.nonce_factory,
        ))
    }

    /// Read-only account endpoints
    ///
    /// Uses the read-only credential if one is configured, otherwise
    /// falls back to the full-access credential.
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        let credential = self
            .read_only
            .as_ref()
            .or(self.full_access.as_ref())
            .ok_or(RestError::MissingCredential { tier: AccessTier::ReadOnly })?;
        Ok(AccountEndpoints::new(
            &self.transport,
            &self.base_urls.read_only,
            credential,
            &self.nonce_factory,
        ))
    }

    // ========================================================================
    // Convenience Delegates
    // ========================================================================

    /// Latest prices for all markets
    pub async fn get_ticker24hr(&self) -> RestResult<crate::types::Ticker24hr> {
        self.public().ticker24hr().await
    }

    /// Open orders for a coin's AUD market
    pub async fn get_depth(&self, cointype: &str) -> RestResult<crate::types::Depth> {
        self.public().depth(cointype).await
    }

    /// Recently completed orders for a coin's AUD market
    pub async fn get_trades(&self, cointype: &str) -> RestResult<crate::types::Trades> {
        self.public().trades(cointype).await
    }

    /// Balances for every asset on the account
    pub async fn get_balances(&self) -> RestResult<crate::types::AccountBalances> {
        self.account()?.balances().await
    }

    /// Place a limit buy order
    pub async fn place_buy_order(
        &self,
        params: crate::types::LimitOrderParams,
    ) -> RestResult<crate::types::PlacedOrder> {
        self.trading()?.place_buy_order(params).await
    }

    /// Place a limit sell order
    pub async fn place_sell_order(
        &self,
        params: crate::types::LimitOrderParams,
    ) -> RestResult<crate::types::PlacedOrder> {
        self.trading()?.place_sell_order(params).await
    }

    /// Cancel an open buy order by id
    pub async fn cancel_buy_order(&self, id: &str) -> RestResult<crate::types::StatusMessage> {
        self.trading()?.cancel_buy_order(id).await
    }

    /// Cancel an open sell order by id
    pub async fn cancel_sell_order(&self, id: &str) -> RestResult<crate::types::StatusMessage> {
        self.trading()?.cancel_sell_order(id).await
    }
}

impl Default for CoinspotClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CoinspotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinspotClient")
            .field("has_full_access", &self.has_full_access())
            .field("has_read_only", &self.has_read_only())
            .finish()
    }
}

/// Client configuration
pub struct ClientConfig {
    /// Full-access credential (trading + funding)
    pub full_access: Option<Credential>,
    /// Read-only credential (account data)
    pub read_only: Option<Credential>,
    /// Base URLs, overridable for testing
    pub base_urls: BaseUrls,
    /// Outbound rate limit
    pub rate_limit: RateLimitConfig,
    /// Retry policy for transient failures
    pub retries: RetryConfig,
    /// Per-attempt timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Custom nonce source for signed requests
    pub nonce_factory: Option<NonceFactory>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            full_access: None,
            read_only: None,
            base_urls: BaseUrls::default(),
            rate_limit: RateLimitConfig::default(),
            retries: RetryConfig::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            nonce_factory: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the full-access credential
    pub fn with_full_access(mut self, credential: Credential) -> Self {
        self.full_access = Some(credential);
        self
    }

    /// Set the read-only credential
    pub fn with_read_only(mut self, credential: Credential) -> Self {
        self.read_only = Some(credential);
        self
    }

    /// Set the base URLs
    pub fn with_base_urls(mut self, base_urls: BaseUrls) -> Self {
        self.base_urls = base_urls;
        self
    }

    /// Set the rate limit
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Set the retry policy
    pub fn with_retries(mut self, retries: RetryConfig) -> Self {
        self.retries = retries;
        self
    }

    /// Set the per-attempt timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the nonce source
    pub fn with_nonce_factory(mut self, factory: NonceFactory) -> Self {
        self.nonce_factory = Some(factory);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_without_credentials() {
        let client = CoinspotClient::new();
        assert!(!client.has_full_access());
        assert!(!client.has_read_only());
    }

    #[test]
    fn test_tier_accessors_check_credentials_eagerly() {
        let client = CoinspotClient::new();
        assert!(matches!(
            client.trading(),
            Err(RestError::MissingCredential { tier: AccessTier::FullAccess })
        ));
        assert!(matches!(
            client.funding(),
            Err(RestError::MissingCredential { tier: AccessTier::FullAccess })
        ));
        assert!(matches!(
            client.account(),
            Err(RestError::MissingCredential { tier: AccessTier::ReadOnly })
        ));
    }

    #[test]
    fn test_read_only_falls_back_to_full_access() {
        let client = CoinspotClient::with_full_access(Credential::new("key", "secret"));
        assert!(client.account().is_ok());
        assert!(client.has_read_only());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_rate_limit(RateLimitConfig::new(10, Duration::from_secs(1)));

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.rate_limit.max_requests, 10);
    }

    #[test]
    fn test_default_urls_cover_all_tiers() {
        let urls = BaseUrls::default();
        assert!(urls.public.contains("pubapi"));
        assert!(urls.read_only.ends_with("/ro"));
    }
}
