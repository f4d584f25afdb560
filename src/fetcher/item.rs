use std::sync::Arc;

use crate::app::Result;
use crate::domain::{Item, ItemId};
use crate::fetcher::{Fetcher, RetryPolicy, UpstreamConfig};

/// Fetches and decodes single items, retrying transient failures.
pub struct ItemFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    upstream: UpstreamConfig,
    retry: RetryPolicy,
}

impl ItemFetcher {
    pub fn new(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        upstream: UpstreamConfig,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            fetcher,
            upstream,
            retry,
        }
    }

    pub async fn fetch_item(&self, id: ItemId) -> Result<Item> {
        let url = self.upstream.item_url(id);

        let body = self
            .retry
            .run(|attempt| {
                if attempt > 1 {
                    tracing::debug!("Retrying item {} (attempt {})", id, attempt);
                }
                self.fetcher.fetch(&url)
            })
            .await?;

        let item: Item = serde_json::from_slice(&body)?;
        Ok(item.with_display_url(&self.upstream.site_base))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::HeadlinerError;
    use crate::domain::ItemKind;
    use crate::fetcher::stub::StubFetcher;

    const ITEM_URL: &str = "https://hacker-news.firebaseio.com/v0/item/8863.json";

    fn item_fetcher(stub: Arc<StubFetcher>, attempts: u32) -> ItemFetcher {
        ItemFetcher::new(
            stub,
            UpstreamConfig::default(),
            RetryPolicy::immediate(attempts),
        )
    }

    #[tokio::test]
    async fn test_fetch_item_attaches_display_url() {
        let stub = Arc::new(StubFetcher::new().body(
            ITEM_URL,
            r#"{"id": 8863, "type": "story", "time": 1175714200, "score": 111, "title": "Dropbox"}"#,
        ));
        let fetcher = item_fetcher(stub.clone(), 3);

        let item = fetcher.fetch_item(8863).await.unwrap();
        assert_eq!(item.kind, ItemKind::Story);
        assert_eq!(item.score, 111);
        assert_eq!(item.display_url, "https://news.ycombinator.com/item?id=8863");
        assert_eq!(stub.calls(ITEM_URL), 1);
    }

    #[tokio::test]
    async fn test_always_failing_upstream_exhausts_budget() {
        let stub = Arc::new(StubFetcher::new().timeout(ITEM_URL));
        let fetcher = item_fetcher(stub.clone(), 2);

        let err = fetcher.fetch_item(8863).await.unwrap_err();
        assert!(matches!(err, HeadlinerError::Exhausted { attempts: 2, .. }));
        assert_eq!(stub.calls(ITEM_URL), 2);
    }

    #[tokio::test]
    async fn test_malformed_item_is_not_retried() {
        let stub = Arc::new(StubFetcher::new().body(ITEM_URL, "{\"id\": 8863,"));
        let fetcher = item_fetcher(stub.clone(), 5);

        let err = fetcher.fetch_item(8863).await.unwrap_err();
        assert!(matches!(err, HeadlinerError::Decode(_)));
        assert_eq!(stub.calls(ITEM_URL), 1);
    }

    #[tokio::test]
    async fn test_missing_item_is_decode_error() {
        let stub = Arc::new(StubFetcher::new().body(ITEM_URL, "null"));
        let fetcher = item_fetcher(stub, 5);

        let err = fetcher.fetch_item(8863).await.unwrap_err();
        assert!(matches!(err, HeadlinerError::Decode(_)));
    }
}
