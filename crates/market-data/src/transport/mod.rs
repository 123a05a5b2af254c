//! HTTP transport for the Alpha Vantage query endpoint.
//!
//! [`Transport::execute`] injects the API key, performs a GET through an
//! [`HttpBackend`] and retries transient failures with exponential backoff.
//! It returns the raw body of the first 2xx response. Interpreting that body
//! is the classifier's job.

mod backend;
mod backoff;

#[cfg(test)]
pub(crate) mod scripted;

pub use backend::{BackendError, HttpBackend, HttpReply, ReqwestBackend};
pub use backoff::{Backoff, RetryPolicy, RETRYABLE_STATUSES};

use std::sync::Arc;

use log::{debug, warn};
use reqwest::Url;

use crate::config::ClientConfig;
use crate::errors::MarketDataError;

const REDACTED: &str = "***";

/// Retrying GET client bound to one configuration.
pub struct Transport {
    config: ClientConfig,
    backend: Arc<dyn HttpBackend>,
    policy: RetryPolicy,
}

impl Transport {
    /// Transport over reqwest with the configured retry count.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_backend(config, Arc::new(ReqwestBackend::new()))
    }

    pub fn with_backend(config: ClientConfig, backend: Arc<dyn HttpBackend>) -> Self {
        let policy = RetryPolicy::exponential(config.max_retries());
        Self {
            config,
            backend,
            policy,
        }
    }

    /// Replace the retry policy (tests use a zero delay).
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Perform one logical request.
    ///
    /// Retries on 429/500/502/503/504 and on connect/timeout failures, up to
    /// `max_retries` additional attempts. Any other non-2xx status fails
    /// immediately. Errors never contain the API key.
    pub async fn execute(&self, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let url = self.build_url(params)?;
        let function = params
            .iter()
            .find(|(key, _)| *key == "function")
            .map(|(_, value)| *value)
            .unwrap_or("unknown");

        debug!("Alpha Vantage request: {}", self.redact(url.as_str()));

        let mut attempt: u32 = 0;
        loop {
            let failure = match self
                .backend
                .get(url.clone(), self.config.request_timeout())
                .await
            {
                Ok(reply) if reply.is_success() => return Ok(reply.body),
                Ok(reply) => {
                    let retryable = self.policy.should_retry_status(reply.status);
                    let error = MarketDataError::Transport {
                        message: format!("HTTP {}", reply.status),
                        status: Some(reply.status),
                    };
                    (error, retryable)
                }
                Err(e) => {
                    let error = MarketDataError::Transport {
                        message: self.redact(e.message()),
                        status: None,
                    };
                    (error, e.is_retryable())
                }
            };

            let (error, retryable) = failure;
            if !retryable || attempt >= self.policy.max_retries {
                if retryable {
                    warn!(
                        "{} failed after {} attempts: {}",
                        function,
                        attempt + 1,
                        error
                    );
                }
                return Err(error);
            }

            let delay = self.policy.delay_for_attempt(attempt);
            attempt += 1;
            warn!(
                "{} attempt {} failed ({}), retrying in {:?}",
                function, attempt, error, delay
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn build_url(&self, params: &[(&str, &str)]) -> Result<Url, MarketDataError> {
        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("apikey", self.config.api_key()));

        Url::parse_with_params(self.config.base_url(), &query).map_err(|e| {
            MarketDataError::validation(format!("invalid request URL: {}", e))
        })
    }

    fn redact(&self, text: &str) -> String {
        let key = self.config.api_key();
        if key.is_empty() {
            text.to_string()
        } else {
            text.replace(key, REDACTED)
        }
    }
}
