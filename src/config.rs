use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Crawler configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CrawlerConfig {
    /// User-agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Base URL that relative page URLs are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Lower bound of the politeness delay, in seconds
    #[serde(default = "default_delay_min")]
    pub delay_min: f64,
    /// Upper bound of the politeness delay, in seconds
    #[serde(default = "default_delay_max")]
    pub delay_max: f64,
    /// Default cap on the number of pages fetched per crawl
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Render-service configuration for the JS-rendered fetch strategy.
    /// Leaving this unset makes `FetchStrategy::JsRendered` a
    /// configuration error.
    #[serde(default)]
    pub renderer: Option<RendererConfig>,
}

/// Configuration for the headless render service
#[derive(Debug, Deserialize, Clone)]
pub struct RendererConfig {
    /// Base URL of the render service
    pub endpoint: String,
    /// How long the renderer may wait for key content selectors, in
    /// milliseconds
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,
    /// Extra settle time after content appears, for lazy-loaded blocks,
    /// in milliseconds
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// Selectors whose appearance counts as "page has content"
    #[serde(default = "default_wait_selectors")]
    pub wait_selectors: Vec<String>,
}

// Default value functions
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_base_url() -> String {
    "https://www.tasteofhome.com".to_string()
}

fn default_delay_min() -> f64 {
    1.0
}

fn default_delay_max() -> f64 {
    2.0
}

fn default_max_items() -> usize {
    10
}

fn default_wait_timeout_ms() -> u64 {
    15_000
}

fn default_settle_ms() -> u64 {
    2_500
}

fn default_wait_selectors() -> Vec<String> {
    vec![
        ".recipe-title".to_string(),
        ".recipe-ingredients".to_string(),
        "h1".to_string(),
    ]
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout: default_timeout(),
            base_url: default_base_url(),
            delay_min: default_delay_min(),
            delay_max: default_delay_max(),
            max_items: default_max_items(),
            renderer: None,
        }
    }
}

impl CrawlerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_CRAWLER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_CRAWLER__RENDERER__ENDPOINT
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: RECIPE_CRAWLER__RENDERER__ENDPOINT
            .add_source(
                Environment::with_prefix("RECIPE_CRAWLER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
