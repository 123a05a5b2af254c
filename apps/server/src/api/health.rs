use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use tickerdesk_market_data::{HealthReport, MarketDataTools};

async fn get_health(State(tools): State<Arc<MarketDataTools>>) -> Json<HealthReport> {
    Json(tools.health())
}

pub fn router() -> Router<Arc<MarketDataTools>> {
    Router::new().route("/health", get(get_health))
}
