use serde::Deserialize;

// Reference constants used whenever a field (or the whole file) is omitted.
const DEFAULT_MENU_URL: &str =
    "https://static-basket-01.wbbasket.ru/vol0/data/main-menu-by-ru-v2.json";
const DEFAULT_FILTER_BASE_URL: &str = "https://catalog.wb.ru/catalog";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) Chrome/125.0.0.0 Safari/537.36";
const DEFAULT_ORIGIN: &str = "https://www.wildberries.ru";
const DEFAULT_REFERER: &str = "https://www.wildberries.ru/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_CONCURRENT_FETCHES: u32 = 30;
const DEFAULT_OUTPUT_DIRECTORY: &str = "./wb-catalog";

/// Main configuration structure for Catalog-Atlas
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub transport: TransportConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Endpoint roots of the catalog API
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// URL of the root menu endpoint (the full category forest)
    #[serde(rename = "menu-url")]
    pub menu_url: String,

    /// Base URL the per-category filter path is appended to
    #[serde(rename = "filter-base-url")]
    pub filter_base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            menu_url: DEFAULT_MENU_URL.to_string(),
            filter_base_url: DEFAULT_FILTER_BASE_URL.to_string(),
        }
    }
}

/// Fixed transport headers and timeouts
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    pub origin: String,

    pub referer: String,

    /// Overall request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Ceiling on simultaneously in-flight filter fetches
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the per-group tabular files are written into
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_OUTPUT_DIRECTORY.to_string(),
        }
    }
}
