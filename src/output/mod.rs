//! Output module for persisting crawl results and reports
//!
//! This module handles:
//! - Saving the raw HTML of accepted pages
//! - Exporting page records as JSON
//! - Computing crawl statistics and writing markdown summaries

mod json;
mod markdown;
mod pages;
pub mod stats;
mod summary;

pub use json::{records_to_json, write_records_json};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use pages::{save_page, save_pages};
pub use stats::{compute_statistics, print_statistics, CrawlStatistics};
pub use summary::CrawlSummary;

use crate::crawler::Digger;
use crate::proxy::SessionProvider;
use thiserror::Error;

/// Errors that can occur while writing crawl output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

/// Builds a crawl summary from a finished (or in-progress) digger
///
/// # Arguments
///
/// * `digger` - The digger whose run should be summarized
/// * `config_hash` - Hash of the configuration the run used, if known
pub fn generate_summary<P: SessionProvider>(
    digger: &Digger<P>,
    config_hash: Option<String>,
) -> CrawlSummary {
    let run = digger.run_info();
    let records = digger.records();
    let stats = compute_statistics(&records, digger.tally());

    let duration_seconds = match (run.started_at, run.finished_at) {
        (Some(started), Some(finished)) => {
            Some((finished - started).num_milliseconds() as f64 / 1000.0)
        }
        _ => None,
    };

    CrawlSummary {
        start_site: run.start_site,
        keyword: run.keyword,
        started_at: run.started_at.map(|t| t.to_rfc3339()),
        finished_at: run.finished_at.map(|t| t.to_rfc3339()),
        duration_seconds,
        config_hash,
        max_pages: digger.crawler_config().max_pages,
        max_threads: digger.crawler_config().max_threads,
        max_depth: digger.crawler_config().max_depth,
        frontier_remaining: digger.frontier_len(),
        pages: records
            .iter()
            .map(|r| (r.id(), r.url().to_string(), r.links().len()))
            .collect(),
        stats,
    }
}
