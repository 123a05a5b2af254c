use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Real-time quote snapshot for one symbol.
///
/// Provider values are kept as the strings the provider sent, so no precision
/// is lost or reformatted on the way through. `change_percent` is the
/// provider's own pre-formatted value (e.g. `"1.30%"`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Upper-case canonical symbol
    pub symbol: String,
    pub price: String,
    pub change: String,
    pub change_percent: String,
    pub volume: String,
    pub latest_trading_day: String,
    pub previous_close: String,
    pub open: String,
    pub high: String,
    pub low: String,

    /// When this snapshot was fetched (UTC)
    pub retrieved_at: DateTime<Utc>,
}

/// Normalize a user-supplied ticker to its canonical form.
pub fn canonical_symbol(raw: &str) -> String {
    raw.trim().to_uppercase()
}
