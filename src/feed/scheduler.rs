use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::feed::PriceFeed;

/// Periodic price refresh.
///
/// Fires once immediately, then every `interval`. Each tick spawns its own
/// fetch and does not wait for the previous one, so slow fetches may overlap;
/// whichever finishes last owns the cache.
pub struct RefreshScheduler;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

impl RefreshScheduler {
    /// Intervals shorter than 1ms are raised to 1ms.
    pub fn start(feed: Arc<PriceFeed>, interval: Duration) -> RefreshHandle {
        let interval = interval.max(MIN_INTERVAL);
        info!(
            "Price refresh for {} every {}ms",
            feed.symbol(),
            interval.as_millis()
        );

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let feed = Arc::clone(&feed);
                tokio::spawn(async move {
                    if let Err(e) = feed.fetch_price().await {
                        debug!("Scheduled refresh failed: {}", e);
                    }
                });
            }
        });

        RefreshHandle { task }
    }
}

/// Stops future ticks when stopped or dropped. Fetches already in flight run
/// to completion.
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
