use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::config::CrawlerConfig;
use crate::error::CrawlError;
use crate::fetch::Fetcher;

/// Plain HTTP GET with a browser-identifying user agent and a timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(CrawlError::Fetch)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, CrawlError> {
        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                status,
                url: url.to_string(),
            });
        }
        let html = response.text().await?;
        debug!("Fetched {} ({} bytes)", url, html.len());
        Ok(html)
    }
}
