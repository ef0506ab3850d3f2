use std::fmt;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, warn};

use crate::feed::{FeedError, QuoteSource};
use crate::models::PriceSnapshot;

/// Human-readable outcome of the most recent fetch, for presentation only.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedStatus {
    Idle,
    Loading { symbol: String },
    Updated(PriceSnapshot),
    NotFound { symbol: String },
    Failed { symbol: String, message: String },
}

impl fmt::Display for FeedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedStatus::Idle => write!(f, "No price requested yet."),
            FeedStatus::Loading { symbol } => write!(f, "Fetching {} price from API...", symbol),
            FeedStatus::Updated(snap) => write!(f, "{}", snap),
            FeedStatus::NotFound { symbol } => {
                write!(f, "{} data not found in API response.", symbol)
            }
            FeedStatus::Failed { symbol, message } => {
                write!(f, "Failed to fetch {} price ({}).", symbol, message)
            }
        }
    }
}

/// Latest-price cache for one instrument.
///
/// The cache holds at most one snapshot and is only ever replaced whole by a
/// successful fetch. Failures leave it untouched.
pub struct PriceFeed {
    source: Arc<dyn QuoteSource>,
    symbol: String,
    latest: RwLock<Option<PriceSnapshot>>,
    status: watch::Sender<FeedStatus>,
}

impl PriceFeed {
    pub fn new(source: Arc<dyn QuoteSource>, symbol: impl Into<String>) -> Self {
        let (status, _) = watch::channel(FeedStatus::Idle);
        Self {
            source,
            symbol: symbol.into(),
            latest: RwLock::new(None),
            status,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub async fn fetch_price(&self) -> Result<PriceSnapshot, FeedError> {
        if self.latest.read().await.is_none() {
            self.publish(FeedStatus::Loading {
                symbol: self.symbol.clone(),
            });
        }

        match self.fetch_snapshot().await {
            Ok(snap) => {
                *self.latest.write().await = Some(snap);
                debug!("{} {}", self.symbol, snap);
                self.publish(FeedStatus::Updated(snap));
                Ok(snap)
            }
            Err(FeedError::SymbolNotFound(symbol)) => {
                warn!("{} missing from quote response", symbol);
                self.publish(FeedStatus::NotFound {
                    symbol: symbol.clone(),
                });
                Err(FeedError::SymbolNotFound(symbol))
            }
            Err(e) => {
                warn!("Price fetch for {} failed: {}", self.symbol, e);
                // A cached price keeps its line; the error only shows before the first success.
                if self.latest.read().await.is_none() {
                    self.publish(FeedStatus::Failed {
                        symbol: self.symbol.clone(),
                        message: e.to_string(),
                    });
                }
                Err(e)
            }
        }
    }

    pub async fn latest_price(&self) -> Option<PriceSnapshot> {
        *self.latest.read().await
    }

    pub fn status(&self) -> FeedStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedStatus> {
        self.status.subscribe()
    }

    async fn fetch_snapshot(&self) -> Result<PriceSnapshot, FeedError> {
        let spreads = self.source.fetch_spreads().await?;
        let quote = spreads
            .into_iter()
            .find(|q| q.symbol == self.symbol)
            .ok_or_else(|| FeedError::SymbolNotFound(self.symbol.clone()))?;
        Ok(PriceSnapshot::new(quote.bid, quote.ask, quote.spread_points))
    }

    fn publish(&self, status: FeedStatus) {
        self.status.send_replace(status);
    }
}
