use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::app::{HeadlinerError, Result};
use crate::fetcher::{Fetcher, UpstreamConfig};

/// reqwest-backed client; the connection pool is shared by every fetch task.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            timeout: config.request_timeout,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        response.error_for_status_ref()?;

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        Ok(body.to_vec())
    }
}

impl HttpFetcher {
    fn classify(&self, err: reqwest::Error) -> HeadlinerError {
        if err.is_timeout() {
            HeadlinerError::Timeout(self.timeout)
        } else {
            HeadlinerError::Http(err)
        }
    }
}
