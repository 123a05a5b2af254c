//! Search result models for symbol lookup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One match from a fuzzy symbol search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    /// Symbol/ticker (e.g., "AAPL", "SHOP.TRT")
    pub symbol: String,

    /// Company or fund name (e.g., "Apple Inc")
    pub name: String,

    /// Instrument type as reported by the provider (e.g., "Equity", "ETF")
    #[serde(rename = "type")]
    pub instrument_type: String,

    /// Region (e.g., "United States")
    pub region: String,

    /// Trading currency (e.g., "USD")
    pub currency: String,
}

/// Matches for a keyword query, in provider order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SymbolSearchResult {
    pub query: String,
    pub matches: Vec<SymbolMatch>,
    pub count: usize,
    pub retrieved_at: DateTime<Utc>,
}

impl SymbolSearchResult {
    pub fn new(query: impl Into<String>, matches: Vec<SymbolMatch>) -> Self {
        Self {
            query: query.into(),
            count: matches.len(),
            matches,
            retrieved_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_type_serializes_as_type() {
        let m = SymbolMatch {
            symbol: "AAPL".to_string(),
            name: "Apple Inc".to_string(),
            instrument_type: "Equity".to_string(),
            region: "United States".to_string(),
            currency: "USD".to_string(),
        };

        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["type"], "Equity");
        assert!(value.get("instrument_type").is_none());
    }

    #[test]
    fn test_search_result_counts_matches() {
        let result = SymbolSearchResult::new("apple", Vec::new());
        assert_eq!(result.count, 0);
        assert_eq!(result.query, "apple");
    }
}
