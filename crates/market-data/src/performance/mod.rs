//! Batch quote fetching and performance ranking.
//!
//! - [`BatchFetcher`] fetches one quote per symbol, sequentially, and turns
//!   per-symbol failures into data instead of errors
//! - [`rank`] scores the fetched quotes and orders them by a [`RankMetric`]
//!
//! [`RankMetric`]: crate::models::RankMetric

mod batch_fetcher;
mod ranker;

pub use batch_fetcher::{
    normalize_symbols, parse_symbol_list, validate_batch, BatchError, BatchFetcher, BatchOutcome,
    SymbolFailure, MAX_BATCH_SYMBOLS,
};
pub use ranker::{performer_metric, rank, Ranking, DEFAULT_RANK_LIMIT};
