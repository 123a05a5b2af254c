//! Raw HTTP GET seam.
//!
//! The transport's retry loop talks to an [`HttpBackend`]. Production code uses
//! [`ReqwestBackend`]; tests script replies without touching the network.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

/// Status and body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Failure before any HTTP status was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    message: String,
    retryable: bool,
}

impl BackendError {
    /// Connect or timeout failure; worth another attempt.
    pub fn retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }

    pub fn non_retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn is_retryable(&self) -> bool {
        self.retryable
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for BackendError {}

/// Executes a single GET request.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn get(&self, url: Url, timeout: Duration) -> Result<HttpReply, BackendError>;
}

/// Production backend using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: Client,
}

impl ReqwestBackend {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!("tickerdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }
}

impl Default for ReqwestBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get(&self, url: Url, timeout: Duration) -> Result<HttpReply, BackendError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key
                let e = e.without_url();
                if e.is_timeout() {
                    BackendError::retryable("request timed out")
                } else if e.is_connect() {
                    BackendError::retryable("connection failed")
                } else {
                    BackendError::non_retryable(format!("request failed: {}", e))
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            if e.is_timeout() {
                BackendError::retryable("timed out reading response body")
            } else {
                BackendError::non_retryable(format!("failed to read response body: {}", e))
            }
        })?;

        Ok(HttpReply { status, body })
    }
}
