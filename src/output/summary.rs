use crate::output::stats::CrawlStatistics;

/// Summary of a crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    // Run metadata
    pub start_site: Option<String>,
    pub keyword: Option<String>,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
    pub duration_seconds: Option<f64>,
    pub config_hash: Option<String>,

    // Limits the run was started with
    pub max_pages: usize,
    pub max_threads: usize,
    pub max_depth: u32,

    /// Entries left unfetched when the run stopped
    pub frontier_remaining: usize,

    /// (id, url, link count) per accepted page, in publish order
    pub pages: Vec<(u64, String, usize)>,

    pub stats: CrawlStatistics,
}

impl CrawlSummary {
    /// Creates a new empty crawl summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Share of budget used, as a percentage
    pub fn budget_used(&self) -> f64 {
        if self.max_pages == 0 {
            return 0.0;
        }
        (self.stats.tally.accepted as f64 / self.max_pages as f64) * 100.0
    }

    /// Accepted pages as a percentage of every attempted fetch
    pub fn acceptance_rate(&self) -> f64 {
        let attempted = self.stats.tally.attempted();
        if attempted == 0 {
            return 0.0;
        }
        (self.stats.tally.accepted as f64 / attempted as f64) * 100.0
    }
}
