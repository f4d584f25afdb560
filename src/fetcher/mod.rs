pub mod http_fetcher;
pub mod ids;
pub mod item;
pub mod parallel;
pub mod retry;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::app::Result;
use crate::config::interval;

pub use ids::{IdListFetcher, ListKind};
pub use item::ItemFetcher;
pub use parallel::FanOutCollector;
pub use retry::RetryPolicy;

/// A single GET against the upstream API.
///
/// Implementations return the full response body or an error; retrying is
/// the caller's business.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Where items come from and how each request is made
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base of the JSON API (default: https://hacker-news.firebaseio.com/v0)
    pub api_base: String,

    /// Base of the human-facing site, used for discussion links
    pub site_base: String,

    /// Which ranked list to pull candidate ids from (default: top)
    pub list: ListKind,

    /// User agent sent with every request
    pub user_agent: String,

    /// Timeout applied to each individual request (default: 5s)
    #[serde(with = "interval::human")]
    pub request_timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base: "https://hacker-news.firebaseio.com/v0".to_string(),
            site_base: "https://news.ycombinator.com".to_string(),
            list: ListKind::Top,
            user_agent: concat!("headliner/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl UpstreamConfig {
    pub fn item_url(&self, id: u64) -> String {
        format!("{}/item/{}.json", self.api_base.trim_end_matches('/'), id)
    }

    pub fn list_url(&self) -> String {
        format!(
            "{}/{}.json",
            self.api_base.trim_end_matches('/'),
            self.list.endpoint()
        )
    }
}
