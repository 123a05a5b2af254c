//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all market data operations
//! - [`RetryClass`]: Classification for determining how callers react to an error

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur during market data operations.
///
/// Messages are short, template-formatted causes. They never carry the API key
/// or a raw provider payload, so they are safe to surface in tool output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// Bad input shape or range, caught before any network call.
    #[error("{0}")]
    Validation(String),

    /// Network failure, timeout, or non-2xx status after retries were exhausted.
    #[error("Request failed: {message}")]
    Transport {
        /// Short cause (never contains the request URL)
        message: String,
        /// Final HTTP status, if the provider answered at all
        status: Option<u16>,
    },

    /// The provider signaled API quota or call-frequency exhaustion.
    /// Callers may back off and retry at a higher level.
    #[error("Rate limit reached: {message}")]
    RateLimited {
        /// Short cause
        message: String,
    },

    /// The provider rejected the request (malformed call, unknown function, ...).
    /// Retrying the same request won't help.
    #[error("API error: {message}")]
    Provider {
        /// Provider-supplied reason
        message: String,
    },

    /// Well-formed response that holds no data for the request.
    #[error("{message}")]
    NotFound {
        /// Human-readable description including the symbol or query
        message: String,
    },

    /// Every symbol of a batch failed to fetch.
    #[error("No data available for the requested symbols")]
    NoDataAvailable,

    /// No fetched quote survived numeric parsing.
    #[error("No metrics computable from the fetched quotes")]
    NoMetricsComputable,
}

impl MarketDataError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Returns the retry classification for this error.
    ///
    /// - [`RetryClass::Never`]: the whole request is invalid or exhausted
    /// - [`RetryClass::WithBackoff`]: stop calling the provider, retry later
    /// - [`RetryClass::SkipItem`]: give up on this item, keep going with the rest
    ///
    /// # Examples
    ///
    /// ```
    /// use tickerdesk_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited { message: "5 calls per minute".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = MarketDataError::NotFound { message: "No data found for symbol ZZZZ".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::SkipItem);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Validation(_) | Self::NoDataAvailable | Self::NoMetricsComputable => {
                RetryClass::Never
            }

            Self::RateLimited { .. } => RetryClass::WithBackoff,

            // Transport failures were already retried inside the transport
            Self::Transport { .. } | Self::Provider { .. } | Self::NotFound { .. } => {
                RetryClass::SkipItem
            }
        }
    }
}
