//! Daily time series models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::errors::MarketDataError;

/// How much history the provider should return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSize {
    /// Latest 100 data points
    #[default]
    Compact,
    /// Full available history
    Full,
}

impl OutputSize {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for OutputSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputSize {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            _ => Err(MarketDataError::validation(format!(
                "outputsize must be 'compact' or 'full', got '{}'",
                s
            ))),
        }
    }
}

/// Open/high/low/close/volume for one trading date, as provider strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPriceBar {
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

/// Dated bars, newest first.
///
/// Serialized as a JSON object whose keys keep the stored (descending) order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecentDays(Vec<(String, DailyPriceBar)>);

impl RecentDays {
    pub fn new(entries: Vec<(String, DailyPriceBar)>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dates in stored order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(date, _)| date.as_str())
    }

    pub fn get(&self, date: &str) -> Option<&DailyPriceBar> {
        self.0
            .iter()
            .find(|(candidate, _)| candidate == date)
            .map(|(_, bar)| bar)
    }
}

impl Serialize for RecentDays {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (date, bar) in &self.0 {
            map.serialize_entry(date, bar)?;
        }
        map.end()
    }
}

/// Windowed view of a symbol's daily price history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailyPrices {
    pub symbol: String,

    /// The most recent trading days, newest first
    pub recent_days: RecentDays,

    /// Number of dates in the full provider series
    pub total_days_available: usize,

    pub retrieved_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(close: &str) -> DailyPriceBar {
        DailyPriceBar {
            open: "1".to_string(),
            high: "2".to_string(),
            low: "0.5".to_string(),
            close: close.to_string(),
            volume: "100".to_string(),
        }
    }

    #[test]
    fn test_output_size_from_str() {
        assert_eq!("compact".parse::<OutputSize>().unwrap(), OutputSize::Compact);
        assert_eq!("FULL".parse::<OutputSize>().unwrap(), OutputSize::Full);
        assert_eq!(OutputSize::default(), OutputSize::Compact);

        let err = "weekly".parse::<OutputSize>().unwrap_err();
        assert!(matches!(err, MarketDataError::Validation(_)));
        assert!(err.to_string().contains("weekly"));
    }

    #[test]
    fn test_recent_days_serializes_in_stored_order() {
        let days = RecentDays::new(vec![
            ("2024-01-16".to_string(), bar("3")),
            ("2024-01-15".to_string(), bar("2")),
        ]);

        let json = serde_json::to_string(&days).unwrap();
        let newer = json.find("2024-01-16").unwrap();
        let older = json.find("2024-01-15").unwrap();
        assert!(newer < older);
    }

    #[test]
    fn test_recent_days_lookup() {
        let days = RecentDays::new(vec![("2024-01-16".to_string(), bar("3"))]);
        assert_eq!(days.get("2024-01-16").unwrap().close, "3");
        assert!(days.get("2024-01-15").is_none());
        assert_eq!(days.dates().collect::<Vec<_>>(), vec!["2024-01-16"]);
    }
}
