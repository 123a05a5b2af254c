use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tickerdesk_market_data::MarketDataTools;

use crate::config::Config;

/// Install the global subscriber. Logs go to stderr; stdout carries replies.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_tools(config: &Config) -> MarketDataTools {
    if config.client.has_api_key() {
        tracing::info!("Alpha Vantage client configured: {:?}", config.client);
    } else {
        tracing::warn!("ALPHA_VANTAGE_API_KEY is not set; health will report degraded");
    }

    MarketDataTools::new(config.client.clone())
}
