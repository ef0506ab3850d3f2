pub mod broker_radar;
pub mod price_feed;
pub mod scheduler;

pub use broker_radar::BrokerRadarClient;
pub use price_feed::{FeedStatus, PriceFeed};
pub use scheduler::{RefreshHandle, RefreshScheduler};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One instrument entry of the quote service's `best_spreads` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadQuote {
    pub symbol: String,
    pub bid: f64,
    pub ask: f64,
    pub spread_points: f64,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("quote service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed quote response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("symbol {0} not found in quote response")]
    SymbolNotFound(String),
}

/// Anything that can list the current best spreads.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_spreads(&self) -> Result<Vec<SpreadQuote>, FeedError>;
}
