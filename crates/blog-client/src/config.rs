//! Client configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Upper bound for a single backoff sleep.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Retry policy for transient failures (connection errors and 5xx answers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; zero disables retrying.
    pub max_retries: u32,
    /// Delay before the first retry, doubled for each one after.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Backoff before retry number `attempt` (0-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(MAX_BACKOFF)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://127.0.0.1:8080`.
    pub base_url: String,
    pub retry: RetryPolicy,
    /// No timeout unless set; a hung request keeps the loading flag up.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            retry: RetryPolicy::default(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_url: env::var("BLOG_API_URL").unwrap_or(defaults.base_url),
            retry: RetryPolicy {
                max_retries: parse_var("BLOG_RETRY_ATTEMPTS")
                    .unwrap_or(defaults.retry.max_retries),
                base_delay: parse_var("BLOG_RETRY_DELAY_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.retry.base_delay),
            },
            request_timeout: parse_var("BLOG_REQUEST_TIMEOUT_SECS").map(Duration::from_secs),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
