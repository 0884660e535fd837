//! Page retrieval strategies.
//!
//! A [`Fetcher`] turns an absolute URL into the page's HTML. The plain
//! HTTP strategy is always available; the JS-rendered strategy needs the
//! `[renderer]` config section and is validated once, before any fetch,
//! so a missing capability is a configuration error rather than a string
//! of per-item failures.

use async_trait::async_trait;
use url::Url;

use crate::config::CrawlerConfig;
use crate::error::CrawlError;
use crate::model::FetchStrategy;

mod browser;
mod http;

pub use self::browser::BrowserFetcher;
pub use self::http::HttpFetcher;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieve the document at `url`. Any error is final for that URL;
    /// fetchers do not retry.
    async fn fetch(&self, url: &Url) -> Result<String, CrawlError>;
}

/// Build the fetcher for the requested strategy, failing fast when the
/// strategy's capability is absent.
pub fn build_fetcher(
    strategy: FetchStrategy,
    config: &CrawlerConfig,
) -> Result<Box<dyn Fetcher>, CrawlError> {
    match strategy {
        FetchStrategy::Http => Ok(Box::new(HttpFetcher::new(config)?)),
        FetchStrategy::JsRendered => {
            let renderer = config.renderer.as_ref().ok_or_else(|| {
                CrawlError::Configuration(
                    "JS-rendered fetching requested but no [renderer] is configured".to_string(),
                )
            })?;
            Ok(Box::new(BrowserFetcher::new(renderer)?))
        }
    }
}
