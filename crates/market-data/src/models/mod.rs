//! Market data models
//!
//! This module contains the records produced by the tools:
//! - `quote` - Real-time quote snapshot (Quote)
//! - `daily` - Daily price bars and the windowed series (DailyPriceBar, DailyPrices)
//! - `search` - Symbol search matches (SymbolMatch, SymbolSearchResult)
//! - `performance` - Derived ranking metrics (PerformerMetric, RankedResult)
//! - `error_record` - Error document shape (ErrorRecord)

mod daily;
mod error_record;
mod performance;
mod quote;
mod search;

pub use daily::{DailyPriceBar, DailyPrices, OutputSize, RecentDays};
pub use error_record::ErrorRecord;
pub use performance::{PerformerMetric, RankMetric, RankedResult};
pub use quote::{canonical_symbol, Quote};
pub use search::{SymbolMatch, SymbolSearchResult};
