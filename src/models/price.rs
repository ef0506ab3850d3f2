use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One consistent bid/ask reading for the configured instrument.
///
/// A snapshot is never mutated once built; the feed swaps in a new one on
/// every successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub bid: f64,
    pub ask: f64,
    pub spread_points: f64,
    pub fetched_at: DateTime<Utc>,
}

impl PriceSnapshot {
    pub fn new(bid: f64, ask: f64, spread_points: f64) -> Self {
        Self {
            bid,
            ask,
            spread_points,
            fetched_at: Utc::now(),
        }
    }

    pub fn mid(&self) -> f64 {
        (self.bid + self.ask) / 2.0
    }
}

impl fmt::Display for PriceSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bid: {:.2} | Ask: {:.2} | Mid: {:.2} | Spread: {} pts",
            self.bid,
            self.ask,
            self.mid(),
            self.spread_points
        )
    }
}
