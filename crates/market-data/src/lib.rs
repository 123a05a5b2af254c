//! Tickerdesk Market Data Crate
//!
//! This crate wraps the Alpha Vantage query API behind a small set of tools:
//! quotes, daily price windows, symbol search and top-performer ranking.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! |  MarketDataTools |  (one JSON document per call)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |  BatchFetcher    | --> |  Ranker          |  (top performers only)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! |    Provider      |  (classifier + record mapper)
//! +------------------+
//!          |
//!          v
//! +------------------+
//! |    Transport     |  (API key, timeout, retry with backoff)
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`ClientConfig`] - Validated API key, endpoint, timeout and retry settings
//! - [`MarketDataTools`] - The tool entry points
//! - [`Quote`], [`DailyPrices`], [`SymbolSearchResult`], [`RankedResult`] - Tool payloads
//! - [`ErrorRecord`] - Error document returned in place of a payload
//! - [`MarketDataError`] - Error enum with retry classification

pub mod config;
pub mod errors;
pub mod models;
pub mod performance;
pub mod provider;
pub mod tools;
pub mod transport;

pub use config::ClientConfig;
pub use errors::{MarketDataError, RetryClass};

// Re-export all public types from models
pub use models::{
    canonical_symbol, DailyPriceBar, DailyPrices, ErrorRecord, OutputSize, PerformerMetric,
    Quote, RankMetric, RankedResult, RecentDays, SymbolMatch, SymbolSearchResult,
};

pub use performance::{BatchError, BatchFetcher, BatchOutcome, SymbolFailure, MAX_BATCH_SYMBOLS};
pub use provider::alpha_vantage::AlphaVantageProvider;
pub use provider::MarketDataProvider;
pub use tools::{HealthReport, HealthStatus, MarketDataTools, ToolOutput};
