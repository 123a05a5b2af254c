//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait the tools and batch fetcher depend on
//! - The Alpha Vantage implementation (classifier, record mapper, client)

mod traits;

pub mod alpha_vantage;

#[cfg(test)]
pub(crate) mod mock;

// Re-exports
pub use traits::MarketDataProvider;
