//! Runtime configuration loaded from the environment
use std::time::Duration;

use crate::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};

/// Relay configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream API key (`FMP_API_KEY`)
    pub api_key: Option<String>,
    /// Upstream API root (`FMP_BASE_URL`)
    pub base_url: String,
    /// Company whose statements are relayed (`FMP_SYMBOL`)
    pub symbol: String,
    /// Bound on each upstream request (`UPSTREAM_TIMEOUT_SECS`)
    pub upstream_timeout: Duration,
    /// Listen host (`HOST`)
    pub host: String,
    /// Listen port (`PORT`)
    pub port: u16,
    /// Default log filter (`LOG_LEVEL`)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads the variables.
    pub fn from_env() -> Result<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let port = get_or("PORT", "5000")
            .parse()
            .map_err(|e| Error::Config(format!("invalid PORT: {e}")))?;
        let timeout_secs: u64 = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .map_err(|e| Error::Config(format!("invalid UPSTREAM_TIMEOUT_SECS: {e}")))?,
            None => DEFAULT_TIMEOUT.as_secs(),
        };

        Ok(Self {
            api_key: lookup("FMP_API_KEY").filter(|key| !key.is_empty()),
            base_url: get_or("FMP_BASE_URL", DEFAULT_BASE_URL),
            symbol: get_or("FMP_SYMBOL", "AAPL"),
            upstream_timeout: Duration::from_secs(timeout_secs),
            host: get_or("HOST", "0.0.0.0"),
            port,
            log_level: get_or("LOG_LEVEL", "info"),
        })
    }

    /// `host:port` to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
