//! Sequential quote fetching for a bounded symbol list.

use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use crate::errors::{MarketDataError, RetryClass};
use crate::models::{canonical_symbol, Quote};
use crate::provider::MarketDataProvider;

/// Largest batch accepted by [`BatchFetcher::fetch_all`].
pub const MAX_BATCH_SYMBOLS: usize = 50;

/// One symbol that could not be fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolFailure {
    pub symbol: String,
    pub reason: String,
}

/// Quotes that were fetched plus the symbols that were skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Symbols requested, after normalization
    pub requested: Vec<String>,
    /// Successful quotes, in request order
    pub quotes: Vec<Quote>,
    pub failures: Vec<SymbolFailure>,
}

impl BatchOutcome {
    pub fn failed_symbols(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.symbol.clone()).collect()
    }
}

/// Request-wide batch failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct BatchError {
    pub error: MarketDataError,
    /// Symbol being fetched when the batch stopped, if it got that far
    pub symbol: Option<String>,
}

impl From<MarketDataError> for BatchError {
    fn from(error: MarketDataError) -> Self {
        Self {
            error,
            symbol: None,
        }
    }
}

/// Trim and upper-case every entry, dropping blanks. Duplicates are kept.
pub fn normalize_symbols<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .map(|s| canonical_symbol(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Split a comma-separated list and normalize it.
pub fn parse_symbol_list(csv: &str) -> Vec<String> {
    let parts: Vec<&str> = csv.split(',').collect();
    normalize_symbols(&parts)
}

/// Reject an empty list or one longer than `max`.
pub fn validate_batch(symbols: &[String], max: usize) -> Result<(), MarketDataError> {
    if symbols.is_empty() {
        return Err(MarketDataError::validation(
            "At least one symbol is required",
        ));
    }
    if symbols.len() > max {
        return Err(MarketDataError::validation(format!(
            "Maximum {} symbols allowed, got {}",
            max,
            symbols.len()
        )));
    }
    Ok(())
}

/// Fetches one quote per symbol, strictly in order.
pub struct BatchFetcher {
    provider: Arc<dyn MarketDataProvider>,
}

impl BatchFetcher {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }

    /// Fetch quotes for `symbols`.
    ///
    /// The list is validated before any provider call. A per-symbol transport,
    /// provider or not-found failure is recorded and the loop moves on. A rate
    /// limit aborts the batch and names the symbol it stopped at. If nothing
    /// succeeds the result is [`MarketDataError::NoDataAvailable`].
    pub async fn fetch_all<S: AsRef<str>>(&self, symbols: &[S]) -> Result<BatchOutcome, BatchError> {
        let requested = normalize_symbols(symbols);
        validate_batch(&requested, MAX_BATCH_SYMBOLS)?;

        debug!(
            "Fetching {} quotes from '{}'",
            requested.len(),
            self.provider.id()
        );

        let mut quotes = Vec::with_capacity(requested.len());
        let mut failures = Vec::new();

        for symbol in &requested {
            match self.provider.get_quote(symbol).await {
                Ok(quote) => quotes.push(quote),
                Err(e) => match e.retry_class() {
                    RetryClass::SkipItem => {
                        warn!("Skipping {}: {}", symbol, e);
                        failures.push(SymbolFailure {
                            symbol: symbol.clone(),
                            reason: e.to_string(),
                        });
                    }
                    RetryClass::WithBackoff | RetryClass::Never => {
                        warn!("Aborting batch at {}: {}", symbol, e);
                        return Err(BatchError {
                            error: e,
                            symbol: Some(symbol.clone()),
                        });
                    }
                },
            }
        }

        info!(
            "Batch complete: {} of {} symbols fetched, {} failed",
            quotes.len(),
            requested.len(),
            failures.len()
        );

        if quotes.is_empty() {
            return Err(MarketDataError::NoDataAvailable.into());
        }

        Ok(BatchOutcome {
            requested,
            quotes,
            failures,
        })
    }
}
