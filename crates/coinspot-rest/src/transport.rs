//! Request pipeline shared by every endpoint
//!
//! A [`Transport`] owns the HTTP client and the rate limiter and applies
//! one policy to all ~60 CoinSpot endpoints: admission through the rate
//! limiter's FIFO gate, bounded retry with exponential backoff, and
//! schema validation of every 2xx response body.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{RestError, RestResult, SchemaIssue};
use crate::rate_limit::RateLimiter;

/// Retry configuration for transient failures
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Additional attempts after the first (0 disables retries)
    pub max_retries: u32,
    /// Delay before the first retry
    pub min_delay: Duration,
    /// Ceiling for any single backoff delay
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each retry
    pub backoff_factor: f64,
}

impl RetryConfig {
    /// Create a new retry configuration
    pub const fn new(
        max_retries: u32,
        min_delay: Duration,
        max_delay: Duration,
        backoff_factor: f64,
    ) -> Self {
        Self { max_retries, min_delay, max_delay, backoff_factor }
    }

    /// Disable retries entirely
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO, Duration::ZERO, 1.0)
    }

    /// Backoff delay before retry number `attempt + 1`:
    /// `min(min_delay * backoff_factor^attempt, max_delay)`
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let scaled =
            self.min_delay.as_secs_f64() * self.backoff_factor.powi(attempt.min(64) as i32);
        if !scaled.is_finite() || scaled >= self.max_delay.as_secs_f64() {
            return self.max_delay;
        }
        Duration::from_secs_f64(scaled)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(200), Duration::from_millis(2000), 2.0)
    }
}

/// Composed request pipeline: rate limiting, retries, execution, validation
#[derive(Debug)]
pub struct Transport {
    http: Client,
    limiter: RateLimiter,
    retries: RetryConfig,
}

impl Transport {
    /// Create a transport from its parts
    ///
    /// The per-attempt timeout and user agent are expected to be set on
    /// the `reqwest` client itself.
    pub fn new(http: Client, limiter: RateLimiter, retries: RetryConfig) -> Self {
        Self { http, limiter, retries }
    }

    /// Issue a GET request and validate the response against `T`
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> RestResult<T> {
        self.limiter.acquire().await;
        self.retryable_request(Method::GET, url, None, &[]).await
    }

    /// Issue a POST request with a JSON body and validate the response
    /// against `T`
    ///
    /// `body` is serialized exactly once per attempt with key order
    /// preserved, so the bytes on the wire match whatever the caller
    /// signed.
    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &Value,
        headers: &[(&str, String)],
    ) -> RestResult<T> {
        self.limiter.acquire().await;
        self.retryable_request(Method::POST, url, Some(body), headers).await
    }

    /// Run one request through the retry state machine
    ///
    /// Retries happen inside this (already admitted) task slot; they do
    /// not re-enter the rate limiter gate and do not block admission of
    /// later requests.
    async fn retryable_request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        headers: &[(&str, String)],
    ) -> RestResult<T> {
        let mut attempt = 0;
        loop {
            match self.execute(method.clone(), url, body, headers).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if !err.is_retryable() || attempt >= self.retries.max_retries {
                        return Err(err);
                    }
                    let delay = self.retries.delay_for(attempt);
                    debug!(%url, attempt, ?delay, error = %err, "retrying request");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Perform exactly one network attempt
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        headers: &[(&str, String)],
    ) -> RestResult<T> {
        let mut request = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");

        for (name, value) in headers {
            request = request.header(*name, value);
        }

        if let Some(body) = body {
            let payload = serde_json::to_string(body)
                .expect("a JSON value always serializes");
            request = request.body(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(RestError::Http { status: status.as_u16(), body: text });
        }

        // CoinSpot answers some endpoints with an empty body; treat it as
        // an empty object rather than a parse failure.
        let json: Value = if text.is_empty() {
            Value::Object(serde_json::Map::new())
        } else {
            match serde_json::from_str(&text) {
                Ok(json) => json,
                Err(err) => {
                    return Err(RestError::Schema {
                        issues: vec![SchemaIssue {
                            path: String::new(),
                            message: format!("invalid JSON: {err}"),
                        }],
                        payload: Value::String(text),
                    })
                }
            }
        };

        validate(json)
    }
}

/// Validate a parsed payload against the shape `T`
///
/// On failure the raw payload travels with the error so callers can see
/// what the server actually sent.
fn validate<T: DeserializeOwned>(payload: Value) -> RestResult<T> {
    match serde_path_to_error::deserialize(&payload) {
        Ok(value) => Ok(value),
        Err(err) => {
            let path = match err.path().to_string() {
                p if p == "." => String::new(),
                p => p,
            };
            let issue = SchemaIssue { path, message: err.inner().to_string() };
            Err(RestError::Schema { issues: vec![issue], payload })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::RateLimitConfig;
    use serde::Deserialize;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize)]
    struct StatusProbe {
        status: String,
    }

    #[derive(Debug, Default, Deserialize)]
    struct EmptyProbe {
        #[serde(default)]
        status: Option<String>,
    }

    fn test_transport(retries: RetryConfig) -> Transport {
        Transport::new(
            Client::new(),
            RateLimiter::new(RateLimitConfig::permissive()),
            retries,
        )
    }

    fn fast_retries(max_retries: u32) -> RetryConfig {
        RetryConfig::new(max_retries, Duration::from_millis(1), Duration::from_millis(5), 2.0)
    }

    #[test]
    fn test_backoff_schedule() {
        let config =
            RetryConfig::new(5, Duration::from_millis(100), Duration::from_millis(2000), 2.0);

        assert_eq!(config.delay_for(0), Duration::from_millis(100));
        assert_eq!(config.delay_for(1), Duration::from_millis(200));
        assert_eq!(config.delay_for(2), Duration::from_millis(400));
        assert_eq!(config.delay_for(3), Duration::from_millis(800));
        assert_eq!(config.delay_for(4), Duration::from_millis(1600));
        // Capped at max_delay from here on.
        assert_eq!(config.delay_for(5), Duration::from_millis(2000));
        assert_eq!(config.delay_for(60), Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_success_after_transient_server_errors() {
        // 503 on attempts 1-2, then 200: three attempts total.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(fast_retries(3));
        let result: StatusProbe =
            transport.get(&format!("{}/latest", server.uri())).await.unwrap();
        assert_eq!(result.status, "ok");
    }

    #[tokio::test]
    async fn test_retry_ceiling_makes_max_retries_plus_one_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let transport = test_transport(fast_retries(2));
        let err = transport
            .get::<StatusProbe>(&format!("{}/latest", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, RestError::Http { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(fast_retries(3));
        let err = transport
            .get::<StatusProbe>(&format!("{}/latest", server.uri()))
            .await
            .unwrap_err();
        match err {
            RestError::Http { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "not found");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_not_retried_and_keeps_payload() {
        let payload = serde_json::json!({ "unexpected": true });
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(fast_retries(3));
        let err = transport
            .get::<StatusProbe>(&format!("{}/latest", server.uri()))
            .await
            .unwrap_err();
        match err {
            RestError::Schema { issues, payload: raw } => {
                assert!(!issues.is_empty());
                assert_eq!(raw, payload);
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limited_status_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(fast_retries(1));
        let result: StatusProbe =
            transport.get(&format!("{}/latest", server.uri())).await.unwrap();
        assert_eq!(result.status, "ok");
    }

    #[tokio::test]
    async fn test_empty_body_validates_as_empty_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let transport = test_transport(RetryConfig::none());
        let result: EmptyProbe =
            transport.get(&format!("{}/latest", server.uri())).await.unwrap();
        assert!(result.status.is_none());
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_schema_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(fast_retries(3));
        let err = transport
            .get::<StatusProbe>(&format!("{}/latest", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, RestError::Schema { .. }));
    }

    #[tokio::test]
    async fn test_failed_request_does_not_poison_the_pipeline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bad"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/good"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(RetryConfig::none());
        assert!(transport.get::<StatusProbe>(&format!("{}/bad", server.uri())).await.is_err());

        // The next request through the same gate still runs.
        let result: StatusProbe =
            transport.get(&format!("{}/good", server.uri())).await.unwrap();
        assert_eq!(result.status, "ok");
    }

    #[tokio::test]
    async fn test_connection_failure_is_a_network_error() {
        // Nothing is listening on the mock server's port once it drops.
        let server = MockServer::start().await;
        let uri = server.uri();
        drop(server);

        let transport = test_transport(RetryConfig::none());
        let err = transport.get::<StatusProbe>(&format!("{uri}/latest")).await.unwrap_err();
        assert!(matches!(err, RestError::Network(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_post_sends_body_bytes_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/my/buy"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = test_transport(RetryConfig::none());
        let body = serde_json::json!({ "nonce": 1000, "cointype": "BTC" });
        let _: StatusProbe = transport
            .post(
                &format!("{}/my/buy", server.uri()),
                &body,
                &[("key", "k".to_string()), ("sign", "s".to_string())],
            )
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            std::str::from_utf8(&requests[0].body).unwrap(),
            r#"{"nonce":1000,"cointype":"BTC"}"#
        );
        assert_eq!(requests[0].headers.get("key").unwrap().to_str().unwrap(), "k");
        assert_eq!(requests[0].headers.get("sign").unwrap().to_str().unwrap(), "s");
    }
}
