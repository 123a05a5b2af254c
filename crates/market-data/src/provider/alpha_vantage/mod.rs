//! Alpha Vantage market data provider implementation.
//!
//! This module provides market data from the Alpha Vantage query API:
//! - Latest quotes via the GLOBAL_QUOTE endpoint
//! - Daily OHLCV series via the TIME_SERIES_DAILY endpoint
//! - Symbol lookup via the SYMBOL_SEARCH endpoint
//!
//! Note: Alpha Vantage free tier is limited to 5 API calls per minute.
//! Throttling is reported in the payload, not with an HTTP status.

mod classifier;
mod mapper;

pub use classifier::classify;
pub use mapper::{
    map_daily_prices, map_quote, map_search_matches, DAILY_WINDOW, MAX_SEARCH_MATCHES,
    NOT_AVAILABLE,
};

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use serde_json::{Map, Value};

use crate::config::ClientConfig;
use crate::errors::MarketDataError;
use crate::models::{DailyPrices, OutputSize, Quote, SymbolMatch};
use crate::provider::MarketDataProvider;
use crate::transport::Transport;

const PROVIDER_ID: &str = "ALPHA_VANTAGE";

/// Query functions used by this provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderFunction {
    GlobalQuote,
    TimeSeriesDaily,
    SymbolSearch,
}

impl ProviderFunction {
    /// Value of the `function` query parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GlobalQuote => "GLOBAL_QUOTE",
            Self::TimeSeriesDaily => "TIME_SERIES_DAILY",
            Self::SymbolSearch => "SYMBOL_SEARCH",
        }
    }
}

/// Alpha Vantage market data provider.
///
/// Every method issues exactly one logical request through the [`Transport`]
/// and runs the body through [`classify`] before mapping it.
pub struct AlphaVantageProvider {
    transport: Transport,
}

impl AlphaVantageProvider {
    /// Create a provider over the default reqwest transport.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            transport: Transport::new(config),
        }
    }

    pub fn with_transport(transport: Transport) -> Self {
        Self { transport }
    }

    async fn fetch(
        &self,
        function: ProviderFunction,
        params: &[(&str, &str)],
    ) -> Result<Map<String, Value>, MarketDataError> {
        let mut all_params: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        all_params.push(("function", function.as_str()));
        all_params.extend_from_slice(params);

        let body = self.transport.execute(&all_params).await?;
        classify(&body)
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        debug!("Fetching quote for {}", symbol);

        let payload = self
            .fetch(ProviderFunction::GlobalQuote, &[("symbol", symbol)])
            .await?;
        map_quote(&payload, symbol, Utc::now())
    }

    async fn get_daily_prices(
        &self,
        symbol: &str,
        output_size: OutputSize,
    ) -> Result<DailyPrices, MarketDataError> {
        debug!("Fetching daily prices for {} ({})", symbol, output_size);

        let payload = self
            .fetch(
                ProviderFunction::TimeSeriesDaily,
                &[("symbol", symbol), ("outputsize", output_size.as_str())],
            )
            .await?;
        map_daily_prices(&payload, symbol, Utc::now())
    }

    async fn search_symbols(&self, keywords: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
        debug!("Searching symbols for '{}'", keywords);

        let payload = self
            .fetch(ProviderFunction::SymbolSearch, &[("keywords", keywords)])
            .await?;
        map_search_matches(&payload, keywords)
    }
}
