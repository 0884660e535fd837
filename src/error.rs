use thiserror::Error;

/// Errors that can occur while crawling recipe pages
#[derive(Error, Debug)]
pub enum CrawlError {
    /// Network-level failure or timeout while fetching a page
    #[error("Failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Failure while locating or reading fields in an HTML document
    #[error("Failed to extract recipe: {0}")]
    Extraction(String),

    /// A URL could not be parsed or resolved against the base
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A required capability is missing or misconfigured
    #[error("Configuration error: {0}")]
    Configuration(String),
}
