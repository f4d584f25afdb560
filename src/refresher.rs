//! Periodic snapshot refresh.
//!
//! The first pipeline run happens before anything is served and its failure
//! aborts startup. After that a background task re-runs the pipeline on a
//! fixed interval; a failed cycle keeps the previous snapshot.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::app::Result;
use crate::config::interval as human_interval;
use crate::pipeline::SnapshotBuilder;
use crate::store::SnapshotStore;

/// Refresh configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Time between the starts of consecutive runs (default: 20s)
    #[serde(with = "human_interval::human")]
    pub interval: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(20),
        }
    }
}

pub struct Refresher {
    builder: Arc<dyn SnapshotBuilder + Send + Sync>,
    store: SnapshotStore,
    period: Duration,
}

impl Refresher {
    pub fn new(
        builder: Arc<dyn SnapshotBuilder + Send + Sync>,
        store: SnapshotStore,
        config: &RefreshConfig,
    ) -> Self {
        Self {
            builder,
            store,
            period: config.interval,
        }
    }

    /// Runs the first refresh, then spawns the periodic loop.
    ///
    /// Runs never overlap. Ticks missed while a run is in progress collapse
    /// into a single immediate re-run. Cancelling `shutdown` stops the loop
    /// and abandons a run in progress.
    pub async fn start(self, shutdown: CancellationToken) -> Result<JoinHandle<()>> {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await;

        info!(
            "Running initial refresh (interval: {})",
            human_interval::format_interval(self.period)
        );
        let snapshot = self.builder.build().await?;
        let items = snapshot.len();
        let version = self.store.publish(snapshot);
        info!("Published snapshot v{} ({} items)", version, items);

        Ok(tokio::spawn(self.run(ticker, shutdown)))
    }

    async fn run(self, mut ticker: Interval, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Shutdown requested, abandoning refresh in progress");
                    break;
                }
                _ = self.refresh_once() => {}
            }
        }

        info!("Refresher stopped");
    }

    /// One refresh cycle. Returns the published version, or `None` when the
    /// cycle failed and the previous snapshot was kept.
    pub async fn refresh_once(&self) -> Option<u64> {
        let start = Utc::now();

        match self.builder.build().await {
            Ok(snapshot) => {
                let items = snapshot.len();
                let version = self.store.publish(snapshot);
                let elapsed = Utc::now().signed_duration_since(start);
                info!(
                    "Published snapshot v{} ({} items, {:.1}s)",
                    version,
                    items,
                    elapsed.num_milliseconds() as f64 / 1000.0
                );
                Some(version)
            }
            Err(e) => {
                warn!(
                    "Refresh failed, keeping snapshot v{}: {}",
                    self.store.current().version,
                    e
                );
                None
            }
        }
    }
}
