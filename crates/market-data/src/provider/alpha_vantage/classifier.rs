//! Detects error payloads that Alpha Vantage returns with HTTP 200.

use log::warn;
use serde_json::{Map, Value};

use crate::errors::MarketDataError;

const NOTE_KEY: &str = "Note";
const INFORMATION_KEY: &str = "Information";
const ERROR_MESSAGE_KEY: &str = "Error Message";

/// Phrases the provider uses in `Information` when throttling.
const THROTTLE_PHRASES: [&str; 3] = ["call frequency", "rate limit", "requests per day"];

/// Parse a 2xx body and reject in-band errors.
///
/// `"Note"` always means rate limiting and wins over every other key.
/// `"Information"` is a rate limit only when it talks about call frequency;
/// otherwise it is informational and the payload passes through.
/// `"Error Message"` is a permanent provider error.
pub fn classify(body: &str) -> Result<Map<String, Value>, MarketDataError> {
    let payload = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            return Err(MarketDataError::Provider {
                message: "malformed response".to_string(),
            })
        }
    };

    if let Some(note) = payload.get(NOTE_KEY) {
        let message = text_of(note);
        warn!("Alpha Vantage rate limit: {}", message);
        return Err(MarketDataError::RateLimited { message });
    }

    if let Some(info) = payload.get(INFORMATION_KEY) {
        let message = text_of(info);
        if is_throttle_message(&message) {
            warn!("Alpha Vantage rate limit: {}", message);
            return Err(MarketDataError::RateLimited { message });
        }
    }

    if let Some(error) = payload.get(ERROR_MESSAGE_KEY) {
        return Err(MarketDataError::Provider {
            message: text_of(error),
        });
    }

    Ok(payload)
}

fn is_throttle_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    THROTTLE_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
