use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::config::RendererConfig;
use crate::error::CrawlError;
use crate::fetch::Fetcher;

#[derive(Serialize)]
struct RenderRequest<'a> {
    url: &'a str,
    /// Selectors the renderer waits for before capturing the document.
    wait_for: &'a [String],
    wait_timeout_ms: u64,
    /// Extra settle time after content appears, for lazy-loaded blocks.
    settle_ms: u64,
}

#[derive(Deserialize)]
struct RenderResponse {
    content: String,
}

/// Fetches the fully rendered document through the headless render
/// service. The service launches a browser per request and tears it down
/// on every exit path, so each fetch is isolated. Render failures are
/// item-level errors; there is no fallback to plain HTTP.
pub struct BrowserFetcher {
    endpoint: String,
    client: Client,
    wait_selectors: Vec<String>,
    wait_timeout_ms: u64,
    settle_ms: u64,
}

impl BrowserFetcher {
    pub fn new(renderer: &RendererConfig) -> Result<Self, CrawlError> {
        let endpoint = format!("{}/api/render", renderer.endpoint.trim_end_matches('/'));
        // Allow the renderer its full wait plus settle budget, with a
        // margin for navigation and transfer.
        let timeout = Duration::from_millis(renderer.wait_timeout_ms + renderer.settle_ms + 10_000);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CrawlError::Fetch)?;

        Ok(Self {
            endpoint,
            client,
            wait_selectors: renderer.wait_selectors.clone(),
            wait_timeout_ms: renderer.wait_timeout_ms,
            settle_ms: renderer.settle_ms,
        })
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, CrawlError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&RenderRequest {
                url: url.as_str(),
                wait_for: &self.wait_selectors,
                wait_timeout_ms: self.wait_timeout_ms,
                settle_ms: self.settle_ms,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                status,
                url: url.to_string(),
            });
        }

        let rendered: RenderResponse = response.json().await?;
        debug!("Rendered {} ({} bytes)", url, rendered.content.len());
        Ok(rendered.content)
    }
}
