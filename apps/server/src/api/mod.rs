//! HTTP surface: `GET /health` plus one `POST /tools/<name>` route per tool.

mod health;
mod tools;

use std::sync::Arc;

use axum::Router;
use tickerdesk_market_data::MarketDataTools;

pub fn app_router(tools: Arc<MarketDataTools>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(tools::router())
        .with_state(tools)
}
