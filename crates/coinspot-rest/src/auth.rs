//! Authentication for CoinSpot private endpoints
//!
//! CoinSpot authenticates private POSTs with three ingredients: a `key`
//! header carrying the API key, a `sign` header carrying a hex-encoded
//! HMAC-SHA512 of the request body, and a strictly increasing `nonce`
//! merged into the body as its first field. The signature covers the
//! exact byte sequence sent on the wire, so the body is serialized once
//! and both signing and transmission use that serialization.
//!
//! # Security
//!
//! Secrets are stored with the `secrecy` crate, which zeroizes memory on
//! drop and keeps the value out of Debug output.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Factory producing the nonce merged into each signed body
///
/// Injectable so tests and callers with their own nonce discipline can
/// supply deterministic values.
pub type NonceFactory = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Default nonce source: current Unix time in milliseconds
pub(crate) fn default_nonce_factory() -> NonceFactory {
    Arc::new(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock is before the Unix epoch")
            .as_millis() as u64
    })
}

/// API credential for one access tier
pub struct Credential {
    key: String,
    secret: SecretString,
}

impl Credential {
    /// Create a credential from an API key and its secret
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// The public API key, sent as the `key` header
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Hex-encoded HMAC-SHA512 of `body` using this credential's secret
    pub fn sign(&self, body: &str) -> String {
        let mut mac = HmacSha512::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(body.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credential {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            secret: SecretString::from(self.secret.expose_secret().to_owned()),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("key", &format!("{}...", &self.key[..8.min(self.key.len())]))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// A signed private request, ready for the transport
#[derive(Debug)]
pub(crate) struct SignedRequest {
    /// Body with the nonce as its first field
    pub payload: Value,
    /// `key` header value
    pub key: String,
    /// `sign` header value
    pub sign: String,
}

/// Merge `nonce` into `body` as the first field and sign the exact
/// serialization that will be transmitted
pub(crate) fn signed_payload(
    credential: &Credential,
    nonce: u64,
    body: Map<String, Value>,
) -> SignedRequest {
    let mut merged = Map::with_capacity(body.len() + 1);
    merged.insert("nonce".to_string(), Value::from(nonce));
    for (field, value) in body {
        merged.insert(field, value);
    }

    let payload = Value::Object(merged);
    let serialized = serde_json::to_string(&payload).expect("a JSON value always serializes");

    SignedRequest {
        key: credential.key().to_string(),
        sign: credential.sign(&serialized),
        payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_signature_covers_nonce_first_serialization() {
        // HMAC-SHA512 of exactly `{"nonce":1000,"a":1}` with key "s".
        let credential = Credential::new("api-key", "s");
        let signed = signed_payload(&credential, 1000, body(json!({ "a": 1 })));

        assert_eq!(
            serde_json::to_string(&signed.payload).unwrap(),
            r#"{"nonce":1000,"a":1}"#
        );
        assert_eq!(
            signed.sign,
            "e0d4ad97136ed30bcf59bc931735825a21417fbe4c7dc34cec7752b4fd9570f7\
             74c5a3d984e9a153bc30d050b89725a4a25dfc66afaa94db439671898eae28de"
        );
    }

    #[test]
    fn test_known_digest_for_trading_style_body() {
        let credential = Credential::new("api-key", "top-secret");
        let signed =
            signed_payload(&credential, 1616492376594, body(json!({ "cointype": "BTC" })));

        assert_eq!(
            signed.sign,
            "1a4fa0783114bad5d74d7133cfe6c3fa29c49d6d8b1e4eb45a10107d2b1ca62d\
             58e88fae3f61b4f4b2c451e71e887e542c7e0e4b3e923c6f1a56dea896b5b55a"
        );
    }

    #[test]
    fn test_signing_is_deterministic() {
        let credential = Credential::new("api-key", "secret");
        let first = signed_payload(&credential, 42, body(json!({ "cointype": "ETH" })));
        let second = signed_payload(&credential, 42, body(json!({ "cointype": "ETH" })));
        assert_eq!(first.sign, second.sign);
    }

    #[test]
    fn test_different_secrets_sign_differently() {
        let a = Credential::new("api-key", "alpha");
        let b = Credential::new("api-key", "beta");
        assert_ne!(a.sign(r#"{"nonce":1}"#), b.sign(r#"{"nonce":1}"#));
    }

    #[test]
    fn test_body_field_order_is_preserved() {
        let credential = Credential::new("api-key", "s");
        let signed = signed_payload(
            &credential,
            7,
            body(json!({ "cointype": "BTC", "amount": 0.5, "rate": 100000 })),
        );
        assert_eq!(
            serde_json::to_string(&signed.payload).unwrap(),
            r#"{"nonce":7,"cointype":"BTC","amount":0.5,"rate":100000}"#
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credential = Credential::new("test_api_key", "test_secret_value");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("test_secret_value"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_default_nonce_is_monotonicish() {
        let factory = default_nonce_factory();
        let first = factory();
        let second = factory();
        assert!(second >= first);
    }
}
