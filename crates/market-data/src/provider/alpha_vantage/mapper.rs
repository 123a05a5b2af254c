//! Maps classified Alpha Vantage payloads onto the crate's records.
//!
//! Alpha Vantage prefixes field names with their position (`"05. price"`,
//! `"1. open"`, `"8. currency"`). Absent sub-fields become [`NOT_AVAILABLE`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::MarketDataError;
use crate::models::{DailyPriceBar, DailyPrices, Quote, RecentDays, SymbolMatch};

/// Placeholder for a sub-field the provider left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Trading days kept in [`DailyPrices::recent_days`].
pub const DAILY_WINDOW: usize = 5;

/// Search matches kept from `bestMatches`.
pub const MAX_SEARCH_MATCHES: usize = 10;

const GLOBAL_QUOTE_KEY: &str = "Global Quote";
const DAILY_SERIES_KEY: &str = "Time Series (Daily)";
const BEST_MATCHES_KEY: &str = "bestMatches";

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

// ============================================================================
// Raw provider shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawQuote {
    #[serde(rename = "02. open", default = "not_available")]
    open: String,
    #[serde(rename = "03. high", default = "not_available")]
    high: String,
    #[serde(rename = "04. low", default = "not_available")]
    low: String,
    #[serde(rename = "05. price", default = "not_available")]
    price: String,
    #[serde(rename = "06. volume", default = "not_available")]
    volume: String,
    #[serde(rename = "07. latest trading day", default = "not_available")]
    latest_trading_day: String,
    #[serde(rename = "08. previous close", default = "not_available")]
    previous_close: String,
    #[serde(rename = "09. change", default = "not_available")]
    change: String,
    #[serde(rename = "10. change percent", default = "not_available")]
    change_percent: String,
}

#[derive(Debug, Deserialize)]
struct RawBar {
    #[serde(rename = "1. open", default = "not_available")]
    open: String,
    #[serde(rename = "2. high", default = "not_available")]
    high: String,
    #[serde(rename = "3. low", default = "not_available")]
    low: String,
    #[serde(rename = "4. close", default = "not_available")]
    close: String,
    #[serde(rename = "5. volume", default = "not_available")]
    volume: String,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    #[serde(rename = "1. symbol", default = "not_available")]
    symbol: String,
    #[serde(rename = "2. name", default = "not_available")]
    name: String,
    #[serde(rename = "3. type", default = "not_available")]
    instrument_type: String,
    #[serde(rename = "4. region", default = "not_available")]
    region: String,
    #[serde(rename = "8. currency", default = "not_available")]
    currency: String,
}

impl From<RawBar> for DailyPriceBar {
    fn from(raw: RawBar) -> Self {
        Self {
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
        }
    }
}

impl From<RawMatch> for SymbolMatch {
    fn from(raw: RawMatch) -> Self {
        Self {
            symbol: raw.symbol,
            name: raw.name,
            instrument_type: raw.instrument_type,
            region: raw.region,
            currency: raw.currency,
        }
    }
}

// ============================================================================
// Mapping
// ============================================================================

/// Map a `GLOBAL_QUOTE` payload. `symbol` must already be canonical.
pub fn map_quote(
    payload: &Map<String, Value>,
    symbol: &str,
    retrieved_at: DateTime<Utc>,
) -> Result<Quote, MarketDataError> {
    let section = data_section(payload, GLOBAL_QUOTE_KEY).ok_or_else(|| {
        MarketDataError::not_found(format!("No data found for symbol {}", symbol))
    })?;
    let raw: RawQuote = decode(section)?;

    Ok(Quote {
        symbol: symbol.to_string(),
        price: raw.price,
        change: raw.change,
        change_percent: raw.change_percent,
        volume: raw.volume,
        latest_trading_day: raw.latest_trading_day,
        previous_close: raw.previous_close,
        open: raw.open,
        high: raw.high,
        low: raw.low,
        retrieved_at,
    })
}

/// Map a `TIME_SERIES_DAILY` payload, keeping the newest [`DAILY_WINDOW`] dates.
pub fn map_daily_prices(
    payload: &Map<String, Value>,
    symbol: &str,
    retrieved_at: DateTime<Utc>,
) -> Result<DailyPrices, MarketDataError> {
    let section = data_section(payload, DAILY_SERIES_KEY).ok_or_else(|| {
        MarketDataError::not_found(format!("No daily data found for {}", symbol))
    })?;
    let series: BTreeMap<String, RawBar> = decode(section)?;
    let total_days_available = series.len();

    // ISO dates sort chronologically as strings
    let recent = series
        .into_iter()
        .rev()
        .take(DAILY_WINDOW)
        .map(|(date, bar)| (date, DailyPriceBar::from(bar)))
        .collect();

    Ok(DailyPrices {
        symbol: symbol.to_string(),
        recent_days: RecentDays::new(recent),
        total_days_available,
        retrieved_at,
    })
}

/// Map a `SYMBOL_SEARCH` payload to at most [`MAX_SEARCH_MATCHES`] matches.
pub fn map_search_matches(
    payload: &Map<String, Value>,
    query: &str,
) -> Result<Vec<SymbolMatch>, MarketDataError> {
    let section = data_section(payload, BEST_MATCHES_KEY)
        .ok_or_else(|| MarketDataError::not_found(format!("No symbols found for '{}'", query)))?;
    let raw: Vec<RawMatch> = decode(section)?;

    Ok(raw
        .into_iter()
        .take(MAX_SEARCH_MATCHES)
        .map(SymbolMatch::from)
        .collect())
}

/// The value under `key`, unless it is missing, null or empty.
fn data_section<'a>(payload: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    match payload.get(key)? {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        value => Some(value),
    }
}

fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, MarketDataError> {
    T::deserialize(value).map_err(|_| MarketDataError::Provider {
        message: "malformed response".to_string(),
    })
}
