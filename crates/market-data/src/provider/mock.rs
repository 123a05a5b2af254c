//! In-memory provider for batch, ranking and tools tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::MarketDataProvider;
use crate::errors::MarketDataError;
use crate::models::{DailyPrices, OutputSize, Quote, SymbolMatch};

pub(crate) struct MockProvider {
    quotes: HashMap<String, Result<Quote, MarketDataError>>,
    daily: HashMap<String, DailyPrices>,
    matches: HashMap<String, Vec<SymbolMatch>>,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    pub(crate) fn new() -> Self {
        Self {
            quotes: HashMap::new(),
            daily: HashMap::new(),
            matches: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_quote(mut self, quote: Quote) -> Self {
        self.quotes.insert(quote.symbol.clone(), Ok(quote));
        self
    }

    pub(crate) fn with_error(mut self, symbol: &str, error: MarketDataError) -> Self {
        self.quotes.insert(symbol.to_string(), Err(error));
        self
    }

    pub(crate) fn with_daily(mut self, daily: DailyPrices) -> Self {
        self.daily.insert(daily.symbol.clone(), daily);
        self
    }

    pub(crate) fn with_matches(mut self, keywords: &str, matches: Vec<SymbolMatch>) -> Self {
        self.matches.insert(keywords.to_string(), matches);
        self
    }

    /// Every call as `"<operation>:<argument>"`, in order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        self.record(format!("quote:{}", symbol));
        self.quotes.get(symbol).cloned().unwrap_or_else(|| {
            Err(MarketDataError::NotFound {
                message: format!("No data found for symbol {}", symbol),
            })
        })
    }

    async fn get_daily_prices(
        &self,
        symbol: &str,
        output_size: OutputSize,
    ) -> Result<DailyPrices, MarketDataError> {
        self.record(format!("daily:{}:{}", symbol, output_size));
        self.daily
            .get(symbol)
            .cloned()
            .ok_or_else(|| MarketDataError::NotFound {
                message: format!("No daily data found for {}", symbol),
            })
    }

    async fn search_symbols(&self, keywords: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
        self.record(format!("search:{}", keywords));
        self.matches
            .get(keywords)
            .cloned()
            .ok_or_else(|| MarketDataError::NotFound {
                message: format!("No symbols found for '{}'", keywords),
            })
    }
}

/// Quote with the numeric fields the ranker reads.
pub(crate) fn quote(
    symbol: &str,
    price: &str,
    previous_close: &str,
    change: &str,
    volume: &str,
) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        price: price.to_string(),
        change: change.to_string(),
        change_percent: "0.0000%".to_string(),
        volume: volume.to_string(),
        latest_trading_day: "2024-01-16".to_string(),
        previous_close: previous_close.to_string(),
        open: price.to_string(),
        high: price.to_string(),
        low: price.to_string(),
        retrieved_at: Utc::now(),
    }
}
