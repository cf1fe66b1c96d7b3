//! Error types for REST API operations

use serde_json::Value;

/// Access tier a credential grants
///
/// CoinSpot issues separate API keys for full access (trade + withdraw)
/// and read-only access; public market data needs no key at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessTier {
    /// Public market data, no authentication
    Public,
    /// Trading, quotes, and withdrawals
    FullAccess,
    /// Account snapshots and history
    ReadOnly,
}

impl std::fmt::Display for AccessTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::FullAccess => write!(f, "full access"),
            Self::ReadOnly => write!(f, "read only"),
        }
    }
}

/// A single shape violation found while validating a response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    /// Dotted path to the offending field, empty for the document root
    pub path: String,
    /// Human-readable description of the violation
    pub message: String,
}

impl std::fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Server answered with a non-2xx status code
    #[error("request failed with status {status}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body, unparsed
        body: String,
    },

    /// A 2xx response body did not match the declared shape
    #[error("response failed schema validation ({} issues)", issues.len())]
    Schema {
        /// Violations reported by the validator
        issues: Vec<SchemaIssue>,
        /// The raw payload, kept for diagnosis
        payload: Value,
    },

    /// Transport-level failure, including per-attempt timeouts
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// No credential configured for the requested access tier
    #[error("{tier} API key/secret is required for this call")]
    MissingCredential {
        /// Tier the call needed
        tier: AccessTier,
    },
}

impl RestError {
    /// Whether another attempt could plausibly succeed
    ///
    /// Server errors (5xx) and rate limiting (429) are transient, as are
    /// all transport failures. A schema mismatch or a missing credential
    /// will not change on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            Self::Schema { .. } => false,
            Self::Network(_) => true,
            Self::MissingCredential { .. } => false,
        }
    }

    /// HTTP status code, if this is an `Http` error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_retryable() {
        let err = RestError::Http { status: 503, body: String::new() };
        assert!(err.is_retryable());

        let err = RestError::Http { status: 429, body: String::new() };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_client_errors_are_terminal() {
        let err = RestError::Http { status: 404, body: String::new() };
        assert!(!err.is_retryable());

        let err = RestError::Http { status: 400, body: String::new() };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_schema_errors_are_terminal() {
        let err = RestError::Schema {
            issues: vec![SchemaIssue {
                path: "prices.bid".to_string(),
                message: "invalid type".to_string(),
            }],
            payload: Value::Null,
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_missing_credential_display() {
        let err = RestError::MissingCredential { tier: AccessTier::FullAccess };
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("full access"));
    }

    #[test]
    fn test_issue_display_includes_path() {
        let issue = SchemaIssue {
            path: "balances[0].rate".to_string(),
            message: "expected a number".to_string(),
        };
        assert_eq!(issue.to_string(), "balances[0].rate: expected a number");
    }
}
