//! Onion-Digger: a keyword-driven onion-service crawler
//!
//! This crate crawls sites reachable only through a Tor SOCKS proxy. Starting from
//! a seed URL (or a search query against a configured search engine), a fixed pool
//! of workers drains a shared frontier breadth-first, deduplicates pages by content
//! hash, and follows only the links that contain the search keyword.

pub mod config;
pub mod crawler;
pub mod output;
pub mod proxy;
pub mod url;

use thiserror::Error;

/// Main error type for Onion-Digger operations
#[derive(Debug, Error)]
pub enum DigError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Tor daemon error: {0}")]
    Daemon(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Search engine URL is not set")]
    MissingSearchEngine,
}

/// Errors produced while fetching a single page through a session
///
/// The crawl engine treats every variant the same way (skip the URL, no retry);
/// the split only exists so the logs say what went wrong.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: proxy unreachable, connection reset, timeout
    #[error("Request error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    /// Anything else (undecodable body, malformed URL, ...)
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            FetchError::Status {
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
                status: status.as_u16(),
            }
        } else if e.is_builder() || e.is_decode() {
            FetchError::Unexpected(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

/// Result type alias for Onion-Digger operations
pub type Result<T> = std::result::Result<T, DigError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Digger, PageRecord};
pub use proxy::{Fetch, FetchedPage, SessionProvider, TorDaemon, TorSessionProvider};
pub use url::{filter_links, unwrap_redirect};
