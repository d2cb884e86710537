//! Configuration module for Onion-Digger
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use onion_digger::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("digger.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.max_threads);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, ProxyConfig, SearchConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
