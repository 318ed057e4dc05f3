use serde::Deserialize;

/// Main configuration structure for Pagesift
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of distinct URLs visited in one crawl run
    #[serde(rename = "page-budget", default = "default_page_budget")]
    pub page_budget: usize,

    /// Per-URL navigation timeout in seconds
    #[serde(
        rename = "navigation-timeout-secs",
        default = "default_navigation_timeout_secs"
    )]
    pub navigation_timeout_secs: u64,
}

/// Headless renderer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    /// WebDriver endpoint to connect to
    #[serde(rename = "webdriver-url", default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Pool of user-agent strings; one is picked at random per page fetch
    #[serde(rename = "user-agents", default = "default_user_agents")]
    pub user_agents: Vec<String>,
}

/// Record sink configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the CSV file that accumulates crawl records
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,
}

/// HTTP API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the API server binds to
    #[serde(rename = "bind-addr", default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_page_budget() -> usize {
    500
}

fn default_navigation_timeout_secs() -> u64 {
    30
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_user_agents() -> Vec<String> {
    vec![
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
    ]
}

fn default_csv_path() -> String {
    "./scraped_data.csv".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:3001".to_string()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_budget: default_page_budget(),
            navigation_timeout_secs: default_navigation_timeout_secs(),
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            user_agents: default_user_agents(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}
