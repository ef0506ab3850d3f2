use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::feed::{FeedError, QuoteSource, SpreadQuote};

pub fn quote(symbol: &str, bid: f64, ask: f64, spread_points: f64) -> SpreadQuote {
    SpreadQuote {
        symbol: symbol.to_string(),
        bid,
        ask,
        spread_points,
    }
}

/// Replays canned responses in order; once exhausted it returns an empty list.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<SpreadQuote>, FeedError>>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<Vec<SpreadQuote>, FeedError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl QuoteSource for ScriptedSource {
    async fn fetch_spreads(&self) -> Result<Vec<SpreadQuote>, FeedError> {
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Always returns the same spreads after `delay`, counting calls.
pub struct CountingSource {
    spreads: Vec<SpreadQuote>,
    delay: Duration,
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl CountingSource {
    pub fn new(spreads: Vec<SpreadQuote>, delay: Duration) -> Self {
        Self {
            spreads,
            delay,
            started: AtomicUsize::new(0),
            finished: AtomicUsize::new(0),
        }
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteSource for CountingSource {
    async fn fetch_spreads(&self) -> Result<Vec<SpreadQuote>, FeedError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(self.spreads.clone())
    }
}
