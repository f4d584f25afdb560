use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::{FanOutCollector, Fetcher, IdListFetcher, ItemFetcher};
use crate::pipeline::Pipeline;
use crate::refresher::Refresher;
use crate::store::SnapshotStore;

pub struct AppContext {
    pub config: Config,
    pub store: SnapshotStore,
    pub pipeline: Arc<Pipeline>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.upstream)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Wires the pipeline around any [`Fetcher`], e.g. a stub in tests.
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let ids = IdListFetcher::new(fetcher.clone(), config.upstream.clone());
        let items = ItemFetcher::new(fetcher, config.upstream.clone(), config.retry.clone());
        let collector =
            FanOutCollector::with_workers(Arc::new(items), config.pipeline.max_concurrency);
        let pipeline = Arc::new(Pipeline::new(ids, collector, &config.pipeline));

        Self {
            config,
            store: SnapshotStore::new(),
            pipeline,
        }
    }

    pub fn refresher(&self) -> Refresher {
        Refresher::new(
            self.pipeline.clone(),
            self.store.clone(),
            &self.config.refresh,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tokio_util::sync::CancellationToken;

    use crate::fetcher::stub::StubFetcher;

    #[tokio::test]
    async fn test_refresher_publishes_into_context_store() {
        let config = Config::default();
        let now = Utc::now().timestamp();
        let stub = StubFetcher::new()
            .body(&config.upstream.list_url(), "[10, 20]")
            .body(
                &config.upstream.item_url(10),
                &format!(r#"{{"id": 10, "type": "story", "time": {}, "score": 5}}"#, now),
            )
            .body(
                &config.upstream.item_url(20),
                &format!(r#"{{"id": 20, "type": "job", "time": {}}}"#, now),
            );
        let ctx = AppContext::with_fetcher(config, Arc::new(stub));
        let shutdown = CancellationToken::new();

        let handle = ctx.refresher().start(shutdown.clone()).await.unwrap();

        let current = ctx.store.current();
        assert_eq!(current.version, 1);
        let ids: Vec<_> = current.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![10, 20]);

        shutdown.cancel();
        handle.await.unwrap();
    }
}
