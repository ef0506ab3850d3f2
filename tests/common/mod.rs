use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use signal_desk::feed::{FeedError, QuoteSource, SpreadQuote};

pub fn quote(symbol: &str, bid: f64, ask: f64, spread_points: f64) -> SpreadQuote {
    SpreadQuote {
        symbol: symbol.to_string(),
        bid,
        ask,
        spread_points,
    }
}

/// A mock quote service whose book can be swapped or taken offline mid-test.
pub struct MockQuoteService {
    spreads: Mutex<Option<Vec<SpreadQuote>>>,
    calls: AtomicUsize,
}

impl MockQuoteService {
    pub fn new(spreads: Vec<SpreadQuote>) -> Self {
        Self {
            spreads: Mutex::new(Some(spreads)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn offline() -> Self {
        Self {
            spreads: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_spreads(&self, spreads: Vec<SpreadQuote>) {
        *self.spreads.lock().unwrap() = Some(spreads);
    }

    pub fn go_offline(&self) {
        *self.spreads.lock().unwrap() = None;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuoteSource for MockQuoteService {
    async fn fetch_spreads(&self) -> Result<Vec<SpreadQuote>, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.spreads.lock().unwrap().clone() {
            Some(spreads) => Ok(spreads),
            None => Err(FeedError::Status {
                status: 502,
                body: "bad gateway".to_string(),
            }),
        }
    }
}
