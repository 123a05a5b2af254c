use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use tickerdesk_market_data::{ErrorRecord, MarketDataTools};

use crate::dispatch::{dispatch_raw, Tool};

/// Run `tool` with the request body as its argument object.
///
/// Tool failures are still reported as a 200 with an error document, the same
/// reply the stdin mode would print.
async fn invoke(tools: Arc<MarketDataTools>, tool: Tool, body: Bytes) -> Response {
    let raw = match std::str::from_utf8(&body) {
        Ok(raw) => raw,
        Err(e) => {
            let record = ErrorRecord::new(format!("Request body is not UTF-8: {}", e));
            return (StatusCode::BAD_REQUEST, Json(record)).into_response();
        }
    };

    tracing::debug!("HTTP dispatch {}", tool.name());
    let reply = dispatch_raw(&tools, tool.name(), Some(raw), false).await;
    ([(header::CONTENT_TYPE, "application/json")], reply).into_response()
}

pub fn router() -> Router<Arc<MarketDataTools>> {
    Tool::ALL.into_iter().fold(Router::new(), |router, tool| {
        router.route(
            &format!("/tools/{}", tool.name()),
            post(
                move |State(tools): State<Arc<MarketDataTools>>, body: Bytes| {
                    invoke(tools, tool, body)
                },
            ),
        )
    })
}
