//! Sequential crawl orchestration.
//!
//! One bad page never aborts the batch: fetch failures and rejected
//! records are contained per item, and the loop keeps a mandatory
//! politeness pause between requests.

use log::{info, warn};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use crate::config::CrawlerConfig;
use crate::error::CrawlError;
use crate::extract::PageExtractor;
use crate::fetch::{build_fetcher, Fetcher};
use crate::model::{CrawlRequest, CrawlResult, ItemFailure, ItemOutcome};
use crate::progress::Progress;

pub struct Crawler {
    config: CrawlerConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl Crawler {
    pub fn new(config: CrawlerConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Install an external stop flag. The flag is checked between items
    /// only; a cancellation during a fetch lets the current item finish.
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    /// Run one crawl invocation.
    ///
    /// The only error path is configuration-time: the requested fetch
    /// strategy is unavailable, or the base URL is invalid. Once fetching
    /// starts, every per-item failure is contained and the result is
    /// always returned, possibly with zero records.
    pub async fn run(
        &self,
        request: &CrawlRequest,
        progress: &mut dyn Progress,
    ) -> Result<CrawlResult, CrawlError> {
        let fetcher = build_fetcher(request.fetch_strategy, &self.config)?;
        let base = Url::parse(&self.config.base_url)?;

        // Truncate before any fetching; URLs past the cap are never hit.
        let urls = &request.urls[..request.urls.len().min(request.max_items)];
        let total = urls.len();
        progress.begin(total);

        let mut result = CrawlResult::default();
        let extractor = PageExtractor;

        for (i, raw_url) in urls.iter().enumerate() {
            if self.cancelled() {
                info!("Crawl cancelled after {} of {} items", i, total);
                break;
            }

            result.attempted += 1;
            let outcome = crawl_one(fetcher.as_ref(), &extractor, &base, raw_url).await;
            let status = match outcome {
                ItemOutcome::Record(record) => {
                    result.succeeded += 1;
                    let status = format!("Scraped \"{}\"", record.title);
                    result.records.push(record);
                    status
                }
                ItemOutcome::Failed(ItemFailure::Fetch(e)) => {
                    warn!("Skipping {raw_url}: {e}");
                    format!("Failed to fetch {raw_url}: {e}")
                }
                ItemOutcome::Failed(ItemFailure::Rejected { title }) => {
                    warn!("Rejected record for {raw_url} (title {title:?})");
                    format!("No usable recipe at {raw_url}")
                }
            };
            progress.item_done(i + 1, total, &status);

            if i + 1 < total {
                sleep(self.politeness_delay(request.delay_range)).await;
            }
        }

        progress.finish(result.succeeded, result.attempted);
        info!(
            "Crawl finished: {} of {} pages yielded recipes",
            result.succeeded, result.attempted
        );
        Ok(result)
    }

    fn politeness_delay(&self, (min, max): (f64, f64)) -> Duration {
        let seconds = if max > min {
            rand::thread_rng().gen_range(min..=max)
        } else {
            min
        };
        Duration::from_secs_f64(seconds.max(0.0))
    }
}

/// Fetch, extract and validate a single URL. Never escapes an error:
/// every failure mode collapses into a typed [`ItemOutcome`].
async fn crawl_one(
    fetcher: &dyn Fetcher,
    extractor: &PageExtractor,
    base: &Url,
    raw_url: &str,
) -> ItemOutcome {
    let url = match base.join(raw_url) {
        Ok(url) => url,
        Err(e) => return ItemOutcome::Failed(ItemFailure::Fetch(CrawlError::Url(e))),
    };

    let html = match fetcher.fetch(&url).await {
        Ok(html) => html,
        Err(e) => return ItemOutcome::Failed(ItemFailure::Fetch(e)),
    };

    let record = extractor.extract(&html, &url);
    if record.is_usable() {
        ItemOutcome::Record(record)
    } else {
        ItemOutcome::Failed(ItemFailure::Rejected {
            title: record.title,
        })
    }
}
