use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::app::Result;
use crate::domain::{Item, ItemId};
use crate::fetcher::ItemFetcher;

pub const DEFAULT_WORKERS: usize = 32;

/// Fans one fetch task out per id and gathers whatever succeeds.
///
/// At most `workers` requests are in flight at once. Items that cannot be
/// fetched are logged and left out; the result order is arbitrary.
pub struct FanOutCollector {
    fetcher: Arc<ItemFetcher>,
    semaphore: Arc<Semaphore>,
}

impl FanOutCollector {
    pub fn with_workers(fetcher: Arc<ItemFetcher>, workers: usize) -> Self {
        Self {
            fetcher,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Dropping the returned future aborts every task still in flight.
    pub async fn collect(&self, ids: Vec<ItemId>) -> Vec<Item> {
        let mut tasks = JoinSet::new();

        for id in ids {
            let fetcher = self.fetcher.clone();
            let semaphore = self.semaphore.clone();

            tasks.spawn(async move {
                let result = fetch_gated(&fetcher, &semaphore, id).await;
                (id, result)
            });
        }

        let launched = tasks.len();
        let mut items = Vec::with_capacity(launched);
        let mut failed = 0;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(item))) => items.push(item),
                Ok((id, Err(e))) => {
                    failed += 1;
                    tracing::warn!("Dropping item {}: {}", id, e);
                }
                Err(e) => {
                    failed += 1;
                    tracing::error!("Task join error: {}", e);
                }
            }
        }

        tracing::debug!(
            "Collected {} of {} items ({} dropped)",
            items.len(),
            launched,
            failed
        );
        items
    }
}

async fn fetch_gated(fetcher: &ItemFetcher, semaphore: &Semaphore, id: ItemId) -> Result<Item> {
    let _permit = semaphore.acquire().await.expect("Semaphore closed");
    fetcher.fetch_item(id).await
}
