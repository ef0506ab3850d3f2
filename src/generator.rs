use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::{build_plan, decide};
use crate::feed::PriceFeed;
use crate::models::{Mode, PriceSnapshot, TradePlan, Verdict};

/// One user "generate" action. Timeframe is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRequest {
    pub timeframe: String,
    pub mode: Mode,
    pub price_input: Option<f64>,
    pub level_a: Option<f64>,
    pub level_b: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalReport {
    pub timeframe: String,
    pub mode: Mode,
    pub generated_at: DateTime<Local>,
    pub price_now: Option<f64>,
    pub snapshot: Option<PriceSnapshot>,
    pub verdict: Verdict,
    pub plan: Option<TradePlan>,
}

impl SignalReport {
    pub fn timestamp(&self) -> String {
        self.generated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Reason plus the numbers it was based on, when they are all known.
    pub fn detail(&self) -> String {
        let mut text = self.verdict.reason.clone();
        let price = self.price_now.filter(|p| p.is_finite());
        if let (Some(price), Some(levels)) = (price, self.verdict.levels) {
            text.push_str(&format!(
                " (Price: {:.2}, Support: {:.2}, Resistance: {:.2})",
                price, levels.lower, levels.upper
            ));
        }
        text
    }

    pub fn meta_line(&self) -> String {
        let mut line = format!(
            "Mode: {} • Timeframe: {} • Generated at {}",
            self.mode.as_str().to_uppercase(),
            self.timeframe,
            self.timestamp()
        );
        if let Some(snap) = &self.snapshot {
            line.push_str(&format!(
                " | Mid API: {:.2} | Spread: {} pts",
                snap.mid(),
                snap.spread_points
            ));
        }
        line
    }

    pub fn history_line(&self) -> String {
        format!(
            "[{}] TF {} | Mode {} -> {}",
            self.timestamp(),
            self.timeframe,
            self.mode.as_str().to_uppercase(),
            self.verdict.signal
        )
    }
}

/// Typed price wins unless it is missing, non-finite or zero; then the
/// cached mid-price is used when there is one. An infinite input is treated
/// like a missing one rather than reaching the decider.
pub fn resolve_price(input: Option<f64>, snapshot: Option<&PriceSnapshot>) -> Option<f64> {
    match input.filter(|p| p.is_finite() && *p != 0.0) {
        Some(p) => Some(p),
        None => snapshot.map(|s| s.mid()).or(input),
    }
}

/// Glue between the price feed and the pure decision functions.
pub struct SignalGenerator {
    feed: Arc<PriceFeed>,
}

impl SignalGenerator {
    pub fn new(feed: Arc<PriceFeed>) -> Self {
        Self { feed }
    }

    pub fn feed(&self) -> &Arc<PriceFeed> {
        &self.feed
    }

    pub async fn generate(&self, request: SignalRequest) -> SignalReport {
        let snapshot = match self.feed.latest_price().await {
            Some(snap) => Some(snap),
            None => {
                debug!("No cached price yet, fetching before deciding");
                self.feed.fetch_price().await.ok()
            }
        };

        let price_now = resolve_price(request.price_input, snapshot.as_ref());
        let verdict = decide(request.mode, price_now, request.level_a, request.level_b);
        let plan = build_plan(
            verdict.signal,
            price_now,
            verdict.support(),
            verdict.resistance(),
        );

        info!(
            "TF {} | Mode {} -> {} [{}]",
            request.timeframe, request.mode, verdict.signal, verdict.basis
        );

        SignalReport {
            timeframe: request.timeframe,
            mode: request.mode,
            generated_at: Local::now(),
            price_now,
            snapshot,
            verdict,
            plan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedError;
    use crate::models::{Basis, Signal};
    use crate::test_helpers::{quote, ScriptedSource};

    fn generator(source: ScriptedSource) -> SignalGenerator {
        SignalGenerator::new(Arc::new(PriceFeed::new(Arc::new(source), "XAUUSD.p")))
    }

    fn request(price: Option<f64>) -> SignalRequest {
        SignalRequest {
            timeframe: "M15".to_string(),
            mode: Mode::Normal,
            price_input: price,
            level_a: Some(2000.0),
            level_b: Some(1900.0),
        }
    }

    #[test]
    fn typed_price_beats_cache() {
        let snap = PriceSnapshot::new(1950.0, 1951.0, 100.0);
        assert_eq!(resolve_price(Some(1905.0), Some(&snap)), Some(1905.0));
        assert_eq!(resolve_price(None, Some(&snap)), Some(1950.5));
        assert_eq!(resolve_price(Some(0.0), Some(&snap)), Some(1950.5));
        assert_eq!(resolve_price(Some(f64::NAN), Some(&snap)), Some(1950.5));
        assert_eq!(resolve_price(Some(f64::INFINITY), Some(&snap)), Some(1950.5));
        assert_eq!(resolve_price(Some(f64::NEG_INFINITY), Some(&snap)), Some(1950.5));
        assert_eq!(resolve_price(None, None), None);
        assert_eq!(resolve_price(Some(0.0), None), Some(0.0));
    }

    #[tokio::test]
    async fn fetches_once_when_cache_empty() {
        let gen = generator(ScriptedSource::new(vec![Ok(vec![quote(
            "XAUUSD.p", 1904.5, 1905.5, 100.0,
        )])]));

        let report = gen.generate(request(None)).await;
        assert_eq!(report.price_now, Some(1905.0));
        assert_eq!(report.verdict.signal, Signal::Buy);
        let plan = report.plan.unwrap();
        assert!((plan.stop_loss - 1890.0).abs() < 1e-9);
        assert!(report.meta_line().contains("Mid API: 1905.00 | Spread: 100 pts"));
    }

    #[tokio::test]
    async fn feed_failure_degrades_to_wait() {
        let gen = generator(ScriptedSource::new(vec![Err(FeedError::SymbolNotFound(
            "XAUUSD.p".to_string(),
        ))]));

        let report = gen.generate(request(None)).await;
        assert!(report.snapshot.is_none());
        assert_eq!(report.verdict.basis, Basis::PriceUnavailable);
        assert!(report.plan.is_none());
        assert_eq!(report.detail(), report.verdict.reason);
    }

    #[tokio::test]
    async fn detail_and_history_text() {
        let gen = generator(ScriptedSource::new(vec![]));
        let report = gen.generate(request(Some(1950.0))).await;

        assert_eq!(report.verdict.signal, Signal::Wait);
        assert!(report
            .detail()
            .ends_with("(Price: 1950.00, Support: 1900.00, Resistance: 2000.00)"));
        assert!(report.history_line().ends_with("TF M15 | Mode NORMAL -> WAIT"));
        assert!(report.meta_line().starts_with("Mode: NORMAL • Timeframe: M15"));
    }
}
