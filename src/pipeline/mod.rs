//! One acquisition run: ids → items → recency filter → rank → top N.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::Result;
use crate::config::interval;
use crate::domain::{Item, Snapshot};
use crate::fetcher::parallel::DEFAULT_WORKERS;
use crate::fetcher::{FanOutCollector, IdListFetcher};

/// Anything that can produce a fresh snapshot on demand.
#[async_trait]
pub trait SnapshotBuilder {
    async fn build(&self) -> Result<Snapshot>;
}

/// Ranking and filtering knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum number of items kept in a snapshot (default: 50)
    pub top_n: usize,

    /// Drop items created outside the recency window (default: true)
    pub filter_recent: bool,

    /// How far back an item may have been created (default: 24h)
    #[serde(with = "interval::human")]
    pub recency_window: Duration,

    /// Maximum item requests in flight at once (default: 32)
    pub max_concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_n: 50,
            filter_recent: true,
            recency_window: Duration::from_secs(24 * 3600),
            max_concurrency: DEFAULT_WORKERS,
        }
    }
}

impl PipelineConfig {
    pub fn recency(&self) -> Option<Duration> {
        self.filter_recent.then_some(self.recency_window)
    }
}

pub struct Pipeline {
    ids: IdListFetcher,
    collector: FanOutCollector,
    top_n: usize,
    recency: Option<Duration>,
}

impl Pipeline {
    pub fn new(ids: IdListFetcher, collector: FanOutCollector, config: &PipelineConfig) -> Self {
        Self {
            ids,
            collector,
            top_n: config.top_n,
            recency: config.recency(),
        }
    }

    pub async fn run(&self) -> Result<Snapshot> {
        self.run_at(Utc::now()).await
    }

    /// Same as [`run`](Self::run) with the recency window anchored at `now`.
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<Snapshot> {
        let ids = self.ids.fetch_ids().await?;
        let candidates = ids.len();

        let mut items = self.collector.collect(ids).await;
        let fetched = items.len();

        if let Some(window) = self.recency {
            items = filter_recent(items, now, window);
        }
        let recent = items.len();

        let items = top_n(rank(items), self.top_n);

        tracing::info!(
            "Built snapshot: {} candidates, {} fetched, {} recent, {} kept",
            candidates,
            fetched,
            recent,
            items.len()
        );
        Ok(Snapshot::new(items, now))
    }
}

#[async_trait]
impl SnapshotBuilder for Pipeline {
    async fn build(&self) -> Result<Snapshot> {
        self.run().await
    }
}

/// Keeps items created within `[now - window, now]`.
pub fn filter_recent(items: Vec<Item>, now: DateTime<Utc>, window: Duration) -> Vec<Item> {
    let window = chrono::Duration::from_std(window).unwrap_or(chrono::Duration::MAX);
    let oldest = now.checked_sub_signed(window).unwrap_or(DateTime::<Utc>::MIN_UTC);

    items
        .into_iter()
        .filter(|item| item.created_at >= oldest && item.created_at <= now)
        .collect()
}

/// Highest score first; equal scores fall back to ascending id.
pub fn rank(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
    items
}

pub fn top_n(mut items: Vec<Item>, n: usize) -> Vec<Item> {
    items.truncate(n);
    items
}
