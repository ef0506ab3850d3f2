use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_QUOTE_URL: &str = "https://api.broker-radar.com/api/public/spreads/v2e/otetmarkets_ecnplus/XAUUSD.p,EURUSD.p,USDCHF.p,DJ30.c.p";
pub const DEFAULT_SYMBOL: &str = "XAUUSD.p";
pub const DEFAULT_REFRESH_MS: u64 = 5000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Quote service
    pub quote_url: String,
    pub symbol: String,
    pub request_timeout_secs: u64,

    // Refresh
    pub refresh_interval_ms: u64,

    // Logging
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            refresh_interval_ms: DEFAULT_REFRESH_MS,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset or unparsable
    /// values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let env = |key: &str, default: String| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(default)
        };

        Config {
            quote_url: env("QUOTE_API_URL", defaults.quote_url),
            symbol: env("QUOTE_SYMBOL", defaults.symbol),
            request_timeout_secs: env("REQUEST_TIMEOUT_SECS", String::new())
                .parse()
                .unwrap_or(defaults.request_timeout_secs),
            refresh_interval_ms: env("PRICE_REFRESH_MS", String::new())
                .parse()
                .ok()
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.refresh_interval_ms),
            log_level: env("LOG_LEVEL", defaults.log_level),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
