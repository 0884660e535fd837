//! Polite recipe-site crawler.
//!
//! Feed it a list of recipe page URLs and it fetches each page in order,
//! extracts a structured [`RecipeRecord`] with per-field selector
//! fallback chains, validates the result and aggregates everything into
//! a [`CrawlResult`], sleeping a random politeness delay between
//! requests. Per-page failures never abort the batch.

pub mod config;
pub mod crawl;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod progress;

pub use config::{CrawlerConfig, RendererConfig};
pub use crawl::Crawler;
pub use error::CrawlError;
pub use extract::PageExtractor;
pub use model::{CrawlRequest, CrawlResult, FetchStrategy, RecipeRecord};
pub use progress::{NullProgress, Progress};

/// Crawl `urls` with the default configuration and plain HTTP fetching.
pub async fn crawl_urls(urls: Vec<String>) -> Result<CrawlResult, CrawlError> {
    let config = CrawlerConfig::default();
    let request = CrawlRequest {
        max_items: urls.len(),
        urls,
        fetch_strategy: FetchStrategy::Http,
        delay_range: (config.delay_min, config.delay_max),
    };
    Crawler::new(config).run(&request, &mut NullProgress).await
}
