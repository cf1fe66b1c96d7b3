//! Client-side rate limiting for the CoinSpot API
//!
//! CoinSpot allows 1000 requests per minute per account. This module
//! bounds outbound request starts to a rolling window, admitting callers
//! in strict submission order so a burst never reorders or starves
//! requests.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Rate limit configuration: at most `max_requests` request starts in any
/// rolling window of length `per`.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Maximum request starts per window
    pub max_requests: usize,
    /// Window length
    pub per: Duration,
}

impl RateLimitConfig {
    /// Create a new rate limit configuration
    pub const fn new(max_requests: usize, per: Duration) -> Self {
        Self { max_requests, per }
    }

    /// CoinSpot's documented limit is 1000 requests/minute; stay just under
    pub const fn coinspot_default() -> Self {
        Self::new(995, Duration::from_secs(60))
    }

    /// A very permissive configuration (for testing)
    pub const fn permissive() -> Self {
        Self::new(100_000, Duration::from_secs(1))
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::coinspot_default()
    }
}

/// Sliding-window rate limiter with strictly FIFO admission
///
/// Admission checks are serialized through a fair async mutex: the lock is
/// held across the wait loop, so the earliest submitter always claims the
/// next freed slot. Only the check-and-record step is serialized — once a
/// caller is admitted the lock is released and request bodies (including
/// their retries) run concurrently.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    admissions: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            admissions: Mutex::new(VecDeque::with_capacity(config.max_requests)),
        }
    }

    /// The active configuration
    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Wait for a free slot in the rolling window, then record this
    /// request's start time
    ///
    /// Never fails; rate limiting produces delay, not errors.
    pub async fn acquire(&self) {
        let mut admissions = self.admissions.lock().await;
        loop {
            let now = Instant::now();
            while admissions
                .front()
                .map_or(false, |oldest| now.duration_since(*oldest) > self.config.per)
            {
                admissions.pop_front();
            }

            if admissions.len() < self.config.max_requests {
                admissions.push_back(Instant::now());
                return;
            }

            // Window is full: sleep until the oldest entry ages out, then
            // re-check (the slot is not reserved while sleeping).
            let oldest = admissions[0];
            let retry_after =
                self.config.per - now.duration_since(oldest) + Duration::from_millis(1);
            sleep(retry_after).await;
        }
    }
}
