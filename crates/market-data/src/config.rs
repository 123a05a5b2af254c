//! Resolved client configuration.
//!
//! The configuration is built once at startup (see the server's `Config`) and
//! handed to the transport by value. Nothing in this crate reads the
//! environment on its own.

use std::fmt;
use std::time::Duration;

use crate::errors::MarketDataError;

/// Default Alpha Vantage query endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default maximum number of retries for transient failures.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

const TIMEOUT_RANGE_SECS: (u64, u64) = (1, 60);
const MAX_RETRIES_LIMIT: u32 = 5;

/// Immutable, validated settings for the provider client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    request_timeout: Duration,
    max_retries: u32,
}

impl ClientConfig {
    /// Build a configuration, enforcing the timeout (1-60s) and retry (0-5) bounds.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout_secs: u64,
        max_retries: u32,
    ) -> Result<Self, MarketDataError> {
        let (min, max) = TIMEOUT_RANGE_SECS;
        if !(min..=max).contains(&timeout_secs) {
            return Err(MarketDataError::validation(format!(
                "request timeout must be between {} and {} seconds, got {}",
                min, max, timeout_secs
            )));
        }

        if max_retries > MAX_RETRIES_LIMIT {
            return Err(MarketDataError::validation(format!(
                "max retries must be between 0 and {}, got {}",
                MAX_RETRIES_LIMIT, max_retries
            )));
        }

        let base_url = base_url.into();
        if reqwest::Url::parse(&base_url).is_err() {
            return Err(MarketDataError::validation(format!(
                "invalid base URL: {}",
                base_url
            )));
        }

        Ok(Self {
            api_key: api_key.into(),
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            max_retries,
        })
    }

    /// Configuration with default endpoint, timeout and retry count.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

// Hand-written so the key never ends up in a log line via `{:?}`.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &if self.has_api_key() { "***" } else { "" })
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}
