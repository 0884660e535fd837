use serde::Serialize;

use crate::error::CrawlError;

/// One extracted recipe page.
///
/// Every fetched page produces exactly one of these, possibly degraded:
/// missing scalar fields carry the literal `"N/A"`, a missing image is an
/// empty string, and a missing title is one of the sentinel values checked
/// by [`is_usable`](RecipeRecord::is_usable). `url` is always absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeRecord {
    pub title: String,
    pub url: String,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub image_url: String,
}

/// Sentinel titles a degraded extraction can produce. Records carrying one
/// of these never make it into a [`CrawlResult`].
pub const TITLE_SENTINELS: [&str; 3] = [
    crate::extract::PARSING_ERROR,
    crate::extract::NO_TITLE,
    crate::extract::NO_TITLE_FOUND,
];

impl RecipeRecord {
    /// Whether the record passes the orchestrator's acceptance check:
    /// a non-empty title that is not a degradation sentinel.
    pub fn is_usable(&self) -> bool {
        !self.title.is_empty() && !TITLE_SENTINELS.contains(&self.title.as_str())
    }
}

/// How pages are retrieved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Single GET with a timeout.
    Http,
    /// Headless-rendered document via the configured render service.
    /// Requires the `[renderer]` config section; there is no fallback to
    /// plain HTTP when rendering fails.
    JsRendered,
}

/// Configuration for one crawl invocation. Immutable once the crawl starts.
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    /// Absolute or base-relative page URLs, in the order they should be
    /// fetched.
    pub urls: Vec<String>,
    pub fetch_strategy: FetchStrategy,
    /// Hard cap on how many of `urls` are fetched; the list is truncated
    /// before the first request.
    pub max_items: usize,
    /// Politeness pause between requests, drawn uniformly from
    /// `(min_seconds, max_seconds)`.
    pub delay_range: (f64, f64),
}

/// Outcome of one crawl invocation.
#[derive(Debug, Default)]
pub struct CrawlResult {
    /// Accepted records, in input-URL order.
    pub records: Vec<RecipeRecord>,
    /// URLs actually attempted (may be less than requested if cancelled).
    pub attempted: usize,
    /// Records accepted into `records`.
    pub succeeded: usize,
}

/// Why a single item produced no record.
#[derive(Debug)]
pub enum ItemFailure {
    /// The page could not be retrieved at all.
    Fetch(CrawlError),
    /// A record was produced but carried a sentinel or empty title.
    Rejected { title: String },
}

/// Per-item result threaded through the crawl loop, keeping "produced a
/// record" and "record is usable" as separate questions.
#[derive(Debug)]
pub enum ItemOutcome {
    Record(RecipeRecord),
    Failed(ItemFailure),
}
