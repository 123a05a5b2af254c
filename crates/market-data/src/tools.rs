//! Tool entry points.
//!
//! Each tool returns exactly one JSON-serializable document: the success
//! record, or an [`ErrorRecord`] naming the symbol or query involved. Errors
//! never escape as `Err` or a panic past this layer.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;

use crate::config::ClientConfig;
use crate::errors::MarketDataError;
use crate::models::{
    canonical_symbol, DailyPrices, ErrorRecord, OutputSize, Quote, RankMetric, RankedResult,
    SymbolSearchResult,
};
use crate::performance::{
    parse_symbol_list, rank, validate_batch, BatchError, BatchFetcher, MAX_BATCH_SYMBOLS,
};
use crate::provider::alpha_vantage::AlphaVantageProvider;
use crate::provider::MarketDataProvider;

/// Service name reported by [`MarketDataTools::health`].
pub const SERVICE_NAME: &str = "tickerdesk";

/// Result of one tool call, serialized as either payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput<T> {
    Ok(T),
    Err(ErrorRecord),
}

impl<T> ToolOutput<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn into_result(self) -> Result<T, ErrorRecord> {
        match self {
            Self::Ok(value) => Ok(value),
            Self::Err(record) => Err(record),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub service: String,
    pub timestamp: DateTime<Utc>,
}

/// The five tools over one provider.
pub struct MarketDataTools {
    provider: Arc<dyn MarketDataProvider>,
    api_key_configured: bool,
}

impl MarketDataTools {
    /// Tools backed by Alpha Vantage.
    pub fn new(config: ClientConfig) -> Self {
        let api_key_configured = config.has_api_key();
        Self {
            provider: Arc::new(AlphaVantageProvider::new(config)),
            api_key_configured,
        }
    }

    pub fn with_provider(provider: Arc<dyn MarketDataProvider>, api_key_configured: bool) -> Self {
        Self {
            provider,
            api_key_configured,
        }
    }

    /// Latest quote for `symbol`.
    pub async fn get_stock_quote(&self, symbol: &str) -> ToolOutput<Quote> {
        let symbol = canonical_symbol(symbol);
        let result = match require(&symbol, "symbol is required") {
            Ok(()) => self.provider.get_quote(&symbol).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(quote) => ToolOutput::Ok(quote),
            Err(e) => ToolOutput::Err(
                failure(format!("Error fetching quote for {}: {}", symbol, e))
                    .with_symbol(symbol),
            ),
        }
    }

    /// Newest daily bars for `symbol`. `outputsize` is `compact` or `full`.
    pub async fn get_daily_prices(&self, symbol: &str, outputsize: &str) -> ToolOutput<DailyPrices> {
        let symbol = canonical_symbol(symbol);
        let result = match validate_daily_request(&symbol, outputsize) {
            Ok(output_size) => self.provider.get_daily_prices(&symbol, output_size).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(daily) => ToolOutput::Ok(daily),
            Err(e) => ToolOutput::Err(
                failure(format!("Error fetching daily prices for {}: {}", symbol, e))
                    .with_symbol(symbol),
            ),
        }
    }

    /// Symbols matching `keywords`. The provider sees the trimmed text; the
    /// result and any error echo `keywords` as given.
    pub async fn search_symbol(&self, keywords: &str) -> ToolOutput<SymbolSearchResult> {
        let trimmed = keywords.trim();
        let result = match require(trimmed, "keywords are required") {
            Ok(()) => self.provider.search_symbols(trimmed).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(matches) => ToolOutput::Ok(SymbolSearchResult::new(keywords, matches)),
            Err(e) => ToolOutput::Err(
                failure(format!("Error searching for '{}': {}", keywords, e)).with_query(keywords),
            ),
        }
    }

    /// Rank a comma-separated list of symbols by `metric`.
    pub async fn analyze_top_performers(
        &self,
        symbols: &str,
        limit: usize,
        metric: &str,
    ) -> ToolOutput<RankedResult> {
        match self.top_performers(symbols, limit, metric).await {
            Ok(result) => ToolOutput::Ok(result),
            Err(e) => {
                let record = failure(format!("Error analyzing top performers: {}", e));
                ToolOutput::Err(match e.symbol {
                    Some(symbol) => record.with_symbol(symbol),
                    None => record,
                })
            }
        }
    }

    pub fn health(&self) -> HealthReport {
        let status = if self.api_key_configured {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        HealthReport {
            status,
            service: SERVICE_NAME.to_string(),
            timestamp: Utc::now(),
        }
    }

    async fn top_performers(
        &self,
        symbols: &str,
        limit: usize,
        metric: &str,
    ) -> Result<RankedResult, BatchError> {
        // Everything is validated before the first provider call
        let metric = RankMetric::from_str(metric)?;
        if limit == 0 {
            return Err(MarketDataError::validation("limit must be at least 1").into());
        }
        let requested = parse_symbol_list(symbols);
        validate_batch(&requested, MAX_BATCH_SYMBOLS)?;

        let outcome = BatchFetcher::new(Arc::clone(&self.provider))
            .fetch_all(&requested)
            .await?;
        let ranking = rank(&outcome.quotes, metric, limit)?;

        let mut failed_symbols = outcome.failed_symbols();
        failed_symbols.extend(ranking.skipped);

        info!(
            "Ranked {} of {} symbols by {}",
            ranking.analyzed_count,
            outcome.requested.len(),
            metric
        );

        Ok(RankedResult {
            metric,
            limit,
            requested_count: outcome.requested.len(),
            analyzed_count: ranking.analyzed_count,
            count: ranking.performers.len(),
            performers: ranking.performers,
            failed_symbols,
            retrieved_at: Utc::now(),
        })
    }
}

fn validate_daily_request(symbol: &str, outputsize: &str) -> Result<OutputSize, MarketDataError> {
    require(symbol, "symbol is required")?;
    OutputSize::from_str(outputsize)
}

fn require(value: &str, message: &str) -> Result<(), MarketDataError> {
    if value.is_empty() {
        Err(MarketDataError::validation(message))
    } else {
        Ok(())
    }
}

fn failure(message: String) -> ErrorRecord {
    warn!("{}", message);
    ErrorRecord::new(message)
}
