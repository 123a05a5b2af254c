//! Derived performance metrics and ranked results.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::MarketDataError;

/// Metric used to order performers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    /// Recomputed percentage change versus the previous close
    #[default]
    ChangePercent,
    /// Traded volume of the latest session
    Volume,
}

impl RankMetric {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChangePercent => "change_percent",
            Self::Volume => "volume",
        }
    }
}

impl fmt::Display for RankMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankMetric {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "change_percent" => Ok(Self::ChangePercent),
            "volume" => Ok(Self::Volume),
            other => Err(MarketDataError::validation(format!(
                "metric must be 'change_percent' or 'volume', got '{}'",
                other
            ))),
        }
    }
}

/// Comparable numbers derived from one quote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PerformerMetric {
    pub symbol: String,
    pub price: Decimal,
    pub previous_close: Decimal,
    pub change: Decimal,
    /// `change / previous_close * 100`, independent of the provider's percent string
    pub change_percent: Decimal,
    pub volume: u64,
    /// Trading day the metric was evaluated on
    pub period: String,
}

/// Output of a top-performers analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    pub metric: RankMetric,
    pub limit: usize,
    /// Symbols asked for, after normalization
    pub requested_count: usize,
    /// Quotes that were fetched and parsed successfully
    pub analyzed_count: usize,
    /// Entries in `performers`
    pub count: usize,
    pub performers: Vec<PerformerMetric>,
    /// Symbols dropped by a fetch or parse failure
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_symbols: Vec<String>,
    pub retrieved_at: DateTime<Utc>,
}
