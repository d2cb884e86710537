//! Markdown summary generation
//!
//! This module generates human-readable markdown summaries of a dig,
//! including run metadata, frontier counters, and the pages that were kept.

use crate::output::summary::CrawlSummary;
use crate::output::OutputResult;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Maximum number of pages listed individually in a summary
const MAX_LISTED_PAGES: usize = 50;

/// Writes a markdown summary of a crawl to a file
///
/// # Arguments
///
/// * `summary` - The crawl summary data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(summary: &CrawlSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl summary as markdown
pub fn format_markdown_summary(summary: &CrawlSummary) -> String {
    let mut md = String::new();

    md.push_str("# Onion-Digger Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Start Site**: {}\n",
        summary.start_site.as_deref().unwrap_or("(none)")
    ));
    md.push_str(&format!(
        "- **Keyword**: {}\n",
        summary.keyword.as_deref().unwrap_or("(none)")
    ));
    if let Some(started) = &summary.started_at {
        md.push_str(&format!("- **Started**: {}\n", started));
    }
    if let Some(finished) = &summary.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished));
    }
    if let Some(duration) = summary.duration_seconds {
        md.push_str(&format!("- **Duration**: {:.2} seconds\n", duration));
    }
    if let Some(hash) = &summary.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push_str(&format!(
        "- **Limits**: {} pages, {} workers, depth {}\n\n",
        summary.max_pages, summary.max_threads, summary.max_depth
    ));

    // Overall statistics
    let stats = &summary.stats;
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Pages Accepted**: {}\n", stats.total_pages));
    md.push_str(&format!(
        "- **Unique Hosts**: {} ({} onion)\n",
        stats.unique_hosts, stats.onion_hosts
    ));
    md.push_str(&format!("- **Total Links**: {}\n", stats.total_links));
    md.push_str(&format!("- **Budget Used**: {:.2}%\n", summary.budget_used()));
    md.push_str(&format!(
        "- **Acceptance Rate**: {:.2}%\n",
        summary.acceptance_rate()
    ));
    md.push_str(&format!(
        "- **Left in Frontier**: {}\n\n",
        summary.frontier_remaining
    ));

    // Frontier outcomes
    let tally = &stats.tally;
    md.push_str("## Frontier Outcomes\n\n");
    md.push_str("| Outcome | Count |\n");
    md.push_str("|---------|-------|\n");
    md.push_str(&format!("| Accepted | {} |\n", tally.accepted));
    md.push_str(&format!("| Duplicate Content | {} |\n", tally.duplicates));
    md.push_str(&format!("| Fetch Failed | {} |\n", tally.fetch_failures));
    md.push_str(&format!("| Dropped (budget) | {} |\n", tally.budget_drops));
    md.push_str(&format!("| Dropped (depth) | {} |\n", tally.depth_drops));
    md.push_str(&format!("| Links Enqueued | {} |\n\n", tally.links_enqueued));

    if !stats.pages_per_host.is_empty() {
        md.push_str("## Pages by Host\n\n");
        md.push_str("| Host | Pages |\n");
        md.push_str("|------|-------|\n");
        for (host, count) in &stats.pages_per_host {
            md.push_str(&format!("| {} | {} |\n", host, count));
        }
        md.push('\n');
    }

    if !summary.pages.is_empty() {
        md.push_str("## Accepted Pages\n\n");
        md.push_str("| ID | URL | Links |\n");
        md.push_str("|----|-----|-------|\n");
        for (id, url, links) in summary.pages.iter().take(MAX_LISTED_PAGES) {
            md.push_str(&format!("| {} | {} | {} |\n", id, url, links));
        }
        if summary.pages.len() > MAX_LISTED_PAGES {
            md.push_str(&format!(
                "\n... and {} more\n",
                summary.pages.len() - MAX_LISTED_PAGES
            ));
        }
        md.push('\n');
    }

    md.push_str("---\n\n");
    md.push_str("*Generated by Onion-Digger*\n");

    md
}
