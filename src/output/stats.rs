//! Statistics computed from accepted page records
//!
//! This module turns the records and counters of a crawl into a statistics
//! summary and prints it to the terminal.

use crate::crawler::{CrawlTally, PageRecord};
use crate::url::{extract_domain, is_onion_host};
use std::collections::HashMap;
use std::sync::Arc;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Number of accepted pages
    pub total_pages: usize,

    /// Number of distinct hosts among accepted pages
    pub unique_hosts: usize,

    /// How many of those hosts are onion services
    pub onion_hosts: usize,

    /// Total number of links extracted from accepted pages
    pub total_links: usize,

    /// Accepted pages per host, most pages first
    pub pages_per_host: Vec<(String, usize)>,

    /// Counters for every frontier entry the run processed
    pub tally: CrawlTally,
}

/// Computes statistics over a set of records
///
/// # Arguments
///
/// * `records` - Accepted page records
/// * `tally` - Counters snapshot from the same run
pub fn compute_statistics(records: &[Arc<PageRecord>], tally: CrawlTally) -> CrawlStatistics {
    let mut per_host: HashMap<String, usize> = HashMap::new();
    let mut total_links = 0;

    for record in records {
        total_links += record.links().len();
        if let Some(host) = extract_domain(record.url()) {
            *per_host.entry(host).or_insert(0) += 1;
        }
    }

    let onion_hosts = per_host.keys().filter(|h| is_onion_host(h)).count();

    let mut pages_per_host: Vec<(String, usize)> = per_host.into_iter().collect();
    // Ties broken by name so output is stable
    pages_per_host.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    CrawlStatistics {
        total_pages: records.len(),
        unique_hosts: pages_per_host.len(),
        onion_hosts,
        total_links,
        pages_per_host,
        tally,
    }
}

/// Prints statistics to stdout in a human-readable format
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages accepted: {}", stats.total_pages);
    println!(
        "  Unique hosts: {} ({} onion)",
        stats.unique_hosts, stats.onion_hosts
    );
    println!("  Total links found: {}", stats.total_links);
    println!();

    let tally = &stats.tally;
    println!("Frontier Entries:");
    println!("  Attempted: {}", tally.attempted());
    println!("  Accepted: {}", tally.accepted);
    println!("  Duplicates: {}", tally.duplicates);
    println!("  Fetch failures: {}", tally.fetch_failures);
    println!("  Dropped (budget): {}", tally.budget_drops);
    println!("  Dropped (depth): {}", tally.depth_drops);
    println!("  Links enqueued: {}", tally.links_enqueued);
    println!();

    if !stats.pages_per_host.is_empty() {
        println!("Pages by Host:");
        for (host, count) in &stats.pages_per_host {
            let percentage = if stats.total_pages > 0 {
                (*count as f64 / stats.total_pages as f64) * 100.0
            } else {
                0.0
            };
            println!("  {}: {} ({:.1}%)", host, count, percentage);
        }
    }
}
