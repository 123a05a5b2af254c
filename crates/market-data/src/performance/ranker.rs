//! Derives comparable metrics from quotes and ranks them.

use std::str::FromStr;

use log::warn;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::{PerformerMetric, Quote, RankMetric};

/// Performers returned when the caller does not ask for a count.
pub const DEFAULT_RANK_LIMIT: usize = 10;

/// Decimal places kept in the recomputed percentage change.
const CHANGE_PERCENT_SCALE: u32 = 4;

/// Ranked performers plus the quotes that could not be scored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranking {
    /// Best first, at most `limit` entries
    pub performers: Vec<PerformerMetric>,
    /// Quotes that produced a metric
    pub analyzed_count: usize,
    /// Symbols whose quote had an unparsable number
    pub skipped: Vec<String>,
}

/// Score one quote. `change_percent` keeps full precision.
///
/// Fails with a short reason when a numeric field does not parse or the
/// percentage does not fit in a `Decimal`.
pub fn performer_metric(quote: &Quote) -> Result<PerformerMetric, String> {
    let price = parse_decimal("price", &quote.price)?;
    let previous_close = parse_decimal("previous_close", &quote.previous_close)?;
    let change = parse_decimal("change", &quote.change)?;
    let volume = quote
        .volume
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("invalid volume '{}'", quote.volume))?;

    let change_percent = if previous_close > Decimal::ZERO {
        change
            .checked_div(previous_close)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| format!("change percent out of range for {}", quote.symbol))?
    } else {
        Decimal::ZERO
    };

    Ok(PerformerMetric {
        symbol: quote.symbol.clone(),
        price,
        previous_close,
        change,
        change_percent,
        volume,
        period: quote.latest_trading_day.clone(),
    })
}

/// Rank `quotes` by `metric`, best first, keeping at most `limit`.
///
/// Ties keep input order. Quotes with unparsable numbers are left out and
/// reported in [`Ranking::skipped`].
pub fn rank(quotes: &[Quote], metric: RankMetric, limit: usize) -> Result<Ranking, MarketDataError> {
    if limit == 0 {
        return Err(MarketDataError::validation("limit must be at least 1"));
    }

    let mut performers = Vec::with_capacity(quotes.len());
    let mut skipped = Vec::new();

    for quote in quotes {
        match performer_metric(quote) {
            Ok(performer) => performers.push(performer),
            Err(reason) => {
                warn!("Excluding {} from ranking: {}", quote.symbol, reason);
                skipped.push(quote.symbol.clone());
            }
        }
    }

    if performers.is_empty() {
        return Err(MarketDataError::NoMetricsComputable);
    }

    let analyzed_count = performers.len();

    // sort_by is stable
    match metric {
        RankMetric::ChangePercent => {
            performers.sort_by(|a, b| b.change_percent.cmp(&a.change_percent))
        }
        RankMetric::Volume => performers.sort_by(|a, b| b.volume.cmp(&a.volume)),
    }
    performers.truncate(limit);

    // Ranked on full precision, rounded for output only
    for performer in &mut performers {
        performer.change_percent = performer.change_percent.round_dp(CHANGE_PERCENT_SCALE);
    }

    Ok(Ranking {
        performers,
        analyzed_count,
        skipped,
    })
}

fn parse_decimal(field: &str, value: &str) -> Result<Decimal, String> {
    Decimal::from_str(value.trim()).map_err(|_| format!("invalid {} '{}'", field, value))
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::provider::mock::quote;

    fn symbols(ranking: &Ranking) -> Vec<&str> {
        ranking
            .performers
            .iter()
            .map(|p| p.symbol.as_str())
            .collect()
    }

    #[test]
    fn test_change_percent_recomputed() {
        let metric = performer_metric(&quote("AAPL", "182.45", "180.11", "2.34", "1000")).unwrap();

        assert_eq!(metric.price, dec!(182.45));
        assert_eq!(metric.previous_close, dec!(180.11));
        assert!((metric.change_percent - dec!(1.2992)).abs() < dec!(0.0001));
        assert_eq!(metric.volume, 1000);
        assert_eq!(metric.period, "2024-01-16");
    }

    #[test]
    fn test_zero_previous_close_gives_zero_percent() {
        let metric = performer_metric(&quote("NEW", "10", "0", "10", "5")).unwrap();
        assert_eq!(metric.change_percent, Decimal::ZERO);
    }

    #[test]
    fn test_negative_previous_close_gives_zero_percent() {
        let metric = performer_metric(&quote("ODD", "10", "-5", "2", "5")).unwrap();
        assert_eq!(metric.change_percent, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_percent_is_skipped() {
        let quotes = vec![
            quote("BIG", "1", "1", "1000000000000000000000000000", "1"),
            quote("OK", "101", "100", "1", "10"),
        ];

        let ranking = rank(&quotes, RankMetric::ChangePercent, 10).unwrap();

        assert_eq!(symbols(&ranking), vec!["OK"]);
        assert_eq!(ranking.skipped, vec!["BIG"]);
        assert!(performer_metric(&quotes[0]).is_err());
    }

    #[test]
    fn test_overflow_only_batch_has_no_metrics() {
        let quotes = vec![quote("BIG", "1", "1", "1000000000000000000000000000", "1")];
        let err = rank(&quotes, RankMetric::ChangePercent, 10).unwrap_err();
        assert_eq!(err, MarketDataError::NoMetricsComputable);
    }

    #[test]
    fn test_near_equal_percents_rank_on_full_precision() {
        let quotes = vec![
            quote("A", "101000.01", "100000", "1000.01", "10"),
            quote("B", "101000.04", "100000", "1000.04", "10"),
        ];

        let ranking = rank(&quotes, RankMetric::ChangePercent, 10).unwrap();

        assert_eq!(symbols(&ranking), vec!["B", "A"]);
        // Output is rounded after ranking
        assert_eq!(ranking.performers[0].change_percent, dec!(1.0000));
    }

    #[test]
    fn test_unparsable_fields() {
        assert!(performer_metric(&quote("X", "N/A", "1", "0", "1")).is_err());
        assert!(performer_metric(&quote("X", "1", "1", "0", "1.5")).is_err());
        let reason = performer_metric(&quote("X", "1", "1", "abc", "1")).unwrap_err();
        assert_eq!(reason, "invalid change 'abc'");
    }

    #[test]
    fn test_rank_by_change_percent() {
        let quotes = vec![
            quote("LOW", "101", "100", "1", "10"),
            quote("HIGH", "110", "100", "10", "10"),
            quote("DOWN", "95", "100", "-5", "10"),
        ];

        let ranking = rank(&quotes, RankMetric::ChangePercent, 10).unwrap();

        assert_eq!(symbols(&ranking), vec!["HIGH", "LOW", "DOWN"]);
        assert_eq!(ranking.analyzed_count, 3);
        assert_eq!(ranking.performers[2].change_percent, dec!(-5));
    }

    #[test]
    fn test_rank_by_volume_is_stable() {
        let quotes = vec![
            quote("A", "1", "1", "0", "100"),
            quote("B", "1", "1", "0", "300"),
            quote("C", "1", "1", "0", "200"),
            quote("D", "1", "1", "0", "300"),
        ];

        let ranking = rank(&quotes, RankMetric::Volume, 10).unwrap();

        assert_eq!(symbols(&ranking), vec!["B", "D", "C", "A"]);
    }

    #[test]
    fn test_limit_truncates() {
        let quotes = vec![
            quote("A", "1", "1", "0", "100"),
            quote("B", "1", "1", "0", "300"),
            quote("C", "1", "1", "0", "200"),
        ];

        let ranking = rank(&quotes, RankMetric::Volume, 2).unwrap();

        assert_eq!(symbols(&ranking), vec!["B", "C"]);
        assert_eq!(ranking.analyzed_count, 3);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let quotes = vec![quote("A", "1", "1", "0", "100")];
        let err = rank(&quotes, RankMetric::Volume, 0).unwrap_err();
        assert!(matches!(err, MarketDataError::Validation(_)));
    }

    #[test]
    fn test_unparsable_quotes_skipped() {
        let quotes = vec![
            quote("GOOD", "1", "1", "0", "100"),
            quote("BAD", "N/A", "N/A", "N/A", "N/A"),
        ];

        let ranking = rank(&quotes, RankMetric::ChangePercent, 10).unwrap();

        assert_eq!(symbols(&ranking), vec!["GOOD"]);
        assert_eq!(ranking.skipped, vec!["BAD"]);
        assert_eq!(ranking.analyzed_count, 1);
    }

    #[test]
    fn test_no_survivors() {
        let quotes = vec![quote("BAD", "N/A", "1", "0", "1")];
        let err = rank(&quotes, RankMetric::ChangePercent, 10).unwrap_err();
        assert_eq!(err, MarketDataError::NoMetricsComputable);
    }
}
