//! Market data provider trait definitions.
//!
//! This module defines the `MarketDataProvider` trait that the tools layer and
//! the batch fetcher are written against.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{DailyPrices, OutputSize, Quote, SymbolMatch};

/// Trait for market data providers.
///
/// Symbols passed in are already canonical (trimmed, upper-case). Each call is
/// one logical provider request; transient transport failures are retried by
/// the implementation before an error is returned.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use tickerdesk_market_data::provider::MarketDataProvider;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for MyProvider {
///     fn id(&self) -> &'static str {
///         "MY_PROVIDER"
///     }
///
///     // ... implement quote, series and search methods
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for `symbol`.
    ///
    /// Returns `NotFound` when the provider knows nothing about the symbol.
    async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;

    /// Fetch the daily series for `symbol`, windowed to the most recent days.
    async fn get_daily_prices(
        &self,
        symbol: &str,
        output_size: OutputSize,
    ) -> Result<DailyPrices, MarketDataError>;

    /// Fuzzy symbol search in provider relevance order.
    ///
    /// Returns `NotFound` when nothing matches.
    async fn search_symbols(&self, keywords: &str) -> Result<Vec<SymbolMatch>, MarketDataError>;
}
