use std::net::SocketAddr;

use anyhow::Context;
use tickerdesk_market_data::config::{
    ClientConfig, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS,
};

pub struct Config {
    pub client: ClientConfig,
    pub log_format: String,
    /// Bind address for `serve` mode.
    pub listen_addr: SocketAddr,
}

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8088";

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("ALPHA_VANTAGE_API_KEY").unwrap_or_default();
        let base_url =
            lookup("ALPHA_VANTAGE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs: u64 = match lookup("REQUEST_TIMEOUT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid REQUEST_TIMEOUT: {}", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let max_retries: u32 = match lookup("MAX_RETRIES") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("Invalid MAX_RETRIES: {}", raw))?,
            None => DEFAULT_MAX_RETRIES,
        };
        let log_format = lookup("TICKERDESK_LOG_FORMAT").unwrap_or_else(|| "text".to_string());
        let raw_addr =
            lookup("TICKERDESK_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = raw_addr
            .trim()
            .parse()
            .with_context(|| format!("Invalid TICKERDESK_LISTEN_ADDR: {}", raw_addr))?;

        let client = ClientConfig::new(api_key.trim(), base_url, timeout_secs, max_retries)?;

        Ok(Self {
            client,
            log_format,
            listen_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert!(!config.client.has_api_key());
        assert_eq!(config.client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.client.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.client.max_retries(), 3);
        assert_eq!(config.log_format, "text");
        assert_eq!(config.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("ALPHA_VANTAGE_API_KEY", "demo"),
            ("ALPHA_VANTAGE_BASE_URL", "http://localhost:9000/query"),
            ("REQUEST_TIMEOUT", "30"),
            ("MAX_RETRIES", "0"),
            ("TICKERDESK_LOG_FORMAT", "json"),
            ("TICKERDESK_LISTEN_ADDR", "0.0.0.0:9100"),
        ]))
        .unwrap();

        assert_eq!(config.client.api_key(), "demo");
        assert_eq!(config.client.base_url(), "http://localhost:9000/query");
        assert_eq!(config.client.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.client.max_retries(), 0);
        assert_eq!(config.log_format, "json");
        assert_eq!(config.listen_addr.port(), 9100);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Config::from_lookup(lookup(&[("REQUEST_TIMEOUT", "120")])).is_err());
        assert!(Config::from_lookup(lookup(&[("MAX_RETRIES", "9")])).is_err());
        assert!(Config::from_lookup(lookup(&[("MAX_RETRIES", "lots")])).is_err());
        assert!(Config::from_lookup(lookup(&[("TICKERDESK_LISTEN_ADDR", "localhost")])).is_err());
    }
}
