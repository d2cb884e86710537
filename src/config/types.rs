use serde::Deserialize;

/// Main configuration structure for Onion-Digger
///
/// Every section is optional; a missing section falls back to its defaults so an
/// empty file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub search: SearchConfig,
    pub proxy: ProxyConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of pages accepted per run
    pub max_pages: usize,

    /// Number of concurrent workers draining the frontier
    pub max_threads: usize,

    /// Maximum link depth below the seed URL (the seed is depth 0)
    pub max_depth: u32,

    /// Join relative links against the page they were found on before enqueueing
    pub resolve_relative_links: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 10,
            max_threads: 10,
            max_depth: 2,
            resolve_relative_links: false,
        }
    }
}

/// Search front-end configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchConfig {
    /// Prefix the keyword is appended to, e.g. `http://xyz.onion/search?q=`
    pub engine_url_template: Option<String>,
}

/// Tor proxy configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProxyConfig {
    /// Host the SOCKS proxy listens on
    pub host: String,

    /// SOCKS port of the Tor daemon
    pub port: u16,

    /// Path to the Tor binary, used when the crawler starts the daemon itself
    pub tor_binary: String,

    /// Whole-request timeout in seconds
    pub request_timeout: u64,

    /// Connect timeout in seconds
    pub connect_timeout: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9050,
            tor_binary: "tor".to_string(),
            request_timeout: 60,
            connect_timeout: 30,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory where each accepted page is saved as `{id}.html`
    pub pages_dir: Option<String>,

    /// Path of the JSON export of all accepted records
    pub records_path: Option<String>,

    /// Path of the markdown crawl summary
    pub summary_path: Option<String>,
}
