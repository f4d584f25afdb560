use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::app::Result;
use crate::domain::ItemId;
use crate::fetcher::{Fetcher, UpstreamConfig};

/// The ranked id lists published by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    #[default]
    Top,
    New,
    Best,
    Ask,
    Show,
    Job,
}

impl ListKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            ListKind::Top => "topstories",
            ListKind::New => "newstories",
            ListKind::Best => "beststories",
            ListKind::Ask => "askstories",
            ListKind::Show => "showstories",
            ListKind::Job => "jobstories",
        }
    }
}

/// Fetches the candidate id list. One request, no retries: a failure here
/// fails the whole pipeline run.
pub struct IdListFetcher {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    upstream: UpstreamConfig,
}

impl IdListFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, upstream: UpstreamConfig) -> Self {
        Self { fetcher, upstream }
    }

    pub async fn fetch_ids(&self) -> Result<Vec<ItemId>> {
        let body = self.fetcher.fetch(&self.upstream.list_url()).await?;
        let ids: Vec<ItemId> = serde_json::from_slice(&body)?;
        tracing::debug!("Fetched {} candidate ids from {}", ids.len(), self.upstream.list.endpoint());
        Ok(ids)
    }
}
