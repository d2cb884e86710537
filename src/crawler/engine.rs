//! Crawl engine - worker pool and crawl loop
//!
//! This module contains the [`Digger`], which owns all state of a crawl run:
//! - The frontier of URLs waiting to be fetched
//! - The ledger (dedup index, page budget, id counter, accepted records)
//! - The pool of workers that drain the frontier concurrently
//!
//! Each worker pops an entry, unwraps redirect wrappers, fetches through its own
//! session, deduplicates by content hash, builds a [`PageRecord`] for new
//! content and pushes the keyword-matching links back onto the frontier.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::ledger::{Admission, Ledger};
use crate::crawler::record::{PageDraft, PageRecord};
use crate::crawler::tally::{CrawlTally, Tally};
use crate::proxy::{Fetch, SessionProvider};
use crate::url::{filter_links, resolve_link, unwrap_redirect};
use crate::ConfigError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Metadata about the most recent dig
#[derive(Debug, Clone, Default)]
pub struct RunInfo {
    /// URL the dig was seeded with
    pub start_site: Option<String>,

    /// Keyword links were filtered by
    pub keyword: Option<String>,

    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

/// State shared by every worker of a run
#[derive(Debug)]
struct DigState {
    frontier: Frontier,
    ledger: Mutex<Ledger>,
    tally: Tally,
}

impl DigState {
    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        // Ledger updates are single statements; a poisoned lock holds consistent data
        self.ledger.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn budget_reached(&self) -> bool {
        self.ledger().budget_reached()
    }
}

/// Per-run settings every worker needs
#[derive(Debug, Clone, Copy)]
struct WorkerSettings {
    max_depth: u32,
    resolve_relative_links: bool,
}

/// Keyword-driven crawler over a session provider
///
/// One `Digger` is one crawl run: the dedup index and page budget carry over
/// between calls to [`Digger::dig`] on the same instance.
///
/// # Example
///
/// ```no_run
/// use onion_digger::config::Config;
/// use onion_digger::{Digger, TorSessionProvider};
///
/// # async fn example() {
/// let config = Config::default();
/// let provider = TorSessionProvider::from_config(&config.proxy);
/// let digger = Digger::from_config(provider, &config);
///
/// digger.dig("http://example.onion/", "market").await;
/// for record in digger.records() {
///     println!("{}", record);
/// }
/// # }
/// ```
pub struct Digger<P: SessionProvider> {
    provider: Arc<P>,
    config: CrawlerConfig,
    search_engine: Option<String>,
    state: Arc<DigState>,
    run: Mutex<RunInfo>,
}

impl<P: SessionProvider> Digger<P> {
    /// Creates a digger with the given crawler settings and no search engine
    pub fn new(provider: P, config: CrawlerConfig) -> Self {
        let state = DigState {
            frontier: Frontier::new(),
            ledger: Mutex::new(Ledger::new(config.max_pages)),
            tally: Tally::default(),
        };

        Self {
            provider: Arc::new(provider),
            config,
            search_engine: None,
            state: Arc::new(state),
            run: Mutex::new(RunInfo::default()),
        }
    }

    /// Creates a digger from the full configuration, including the search engine
    pub fn from_config(provider: P, config: &Config) -> Self {
        let mut digger = Self::new(provider, config.crawler.clone());
        digger.search_engine = config.search.engine_url_template.clone();
        digger
    }

    /// Sets the search engine URL template used by [`Digger::search`]
    pub fn with_search_engine(mut self, template: impl Into<String>) -> Self {
        self.set_search_engine(template);
        self
    }

    pub fn set_search_engine(&mut self, template: impl Into<String>) {
        self.search_engine = Some(template.into());
    }

    pub fn search_engine(&self) -> Option<&str> {
        self.search_engine.as_deref()
    }

    pub fn crawler_config(&self) -> &CrawlerConfig {
        &self.config
    }

    fn run_info_mut(&self) -> MutexGuard<'_, RunInfo> {
        self.run.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Crawls outward from `seed_url`, following links that contain `keyword`
    ///
    /// Spawns `max_threads` workers on the current tokio runtime and returns once
    /// every one of them has exited, which happens when the frontier has drained
    /// or the page budget is spent. Fetch failures and worker panics are logged,
    /// never returned.
    ///
    /// # Arguments
    ///
    /// * `seed_url` - First URL to fetch (depth 0)
    /// * `keyword` - Substring a discovered link must contain to be followed
    pub async fn dig(&self, seed_url: &str, keyword: &str) {
        {
            let mut run = self.run_info_mut();
            run.start_site = Some(seed_url.to_string());
            run.keyword = Some(keyword.to_string());
            run.started_at = Some(Utc::now());
            run.finished_at = None;
        }

        tracing::info!(
            "Digging from {} for [{}] with {} workers (max {} pages, max depth {})",
            seed_url,
            keyword,
            self.config.max_threads,
            self.config.max_pages,
            self.config.max_depth
        );

        self.state.frontier.push(FrontierEntry::seed(seed_url));

        let settings = WorkerSettings {
            max_depth: self.config.max_depth,
            resolve_relative_links: self.config.resolve_relative_links,
        };

        let mut handles = Vec::with_capacity(self.config.max_threads);
        for worker_id in 0..self.config.max_threads {
            let state = Arc::clone(&self.state);
            let provider = Arc::clone(&self.provider);
            let keyword = keyword.to_string();

            handles.push(tokio::spawn(async move {
                run_worker(worker_id, state, provider, keyword, settings).await;
            }));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Worker task failed: {}", e);
            }
        }

        self.run_info_mut().finished_at = Some(Utc::now());

        let tally = self.tally();
        tracing::info!(
            "Dig finished: {} pages accepted, {} duplicates, {} fetch failures, {} left in frontier",
            tally.accepted,
            tally.duplicates,
            tally.fetch_failures,
            self.state.frontier.queued()
        );
    }

    /// Searches the configured engine for `keyword` and digs from the results page
    ///
    /// The keyword is appended to the template verbatim, without URL encoding.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The dig ran (individual fetch failures are not errors)
    /// * `Err(DigError::Config)` - No search engine is configured; nothing was crawled
    pub async fn search(&self, keyword: &str) -> crate::Result<()> {
        let Some(template) = self.search_engine.as_deref() else {
            tracing::error!("Search engine URL is not set.");
            return Err(ConfigError::MissingSearchEngine.into());
        };

        let search_url = format!("{}{}", template, keyword);
        tracing::info!("Searching for [{}] using {}", keyword, search_url);

        self.dig(&search_url, keyword).await;
        Ok(())
    }

    /// Accepted records, in id order
    pub fn records(&self) -> Vec<Arc<PageRecord>> {
        self.state.ledger().records().to_vec()
    }

    /// Number of pages accepted so far
    pub fn pages_crawled(&self) -> usize {
        self.state.ledger().pages_crawled()
    }

    /// Record accepted for a content hash
    pub fn record_for_hash(&self, hash: &str) -> Option<Arc<PageRecord>> {
        self.state.ledger().record_for_hash(hash)
    }

    /// Number of distinct content hashes accepted
    pub fn seen_count(&self) -> usize {
        self.state.ledger().seen_count()
    }

    /// Entries still waiting in the frontier
    pub fn frontier_len(&self) -> usize {
        self.state.frontier.queued()
    }

    pub fn tally(&self) -> CrawlTally {
        let accepted = self.pages_crawled();
        self.state.tally.snapshot(accepted)
    }

    pub fn run_info(&self) -> RunInfo {
        self.run_info_mut().clone()
    }
}

impl<P: SessionProvider> fmt::Display for Digger<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start_site = self.run_info().start_site;
        write!(
            f,
            "Digger(max_pages={}, max_threads={}, start_site={}, pages_crawled={})",
            self.config.max_pages,
            self.config.max_threads,
            start_site.as_deref().unwrap_or("None"),
            self.pages_crawled()
        )
    }
}

/// Worker loop: drain the frontier until it is empty or the budget is spent
async fn run_worker<P: SessionProvider>(
    worker_id: usize,
    state: Arc<DigState>,
    provider: Arc<P>,
    keyword: String,
    settings: WorkerSettings,
) {
    let session = match provider.obtain_session() {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Worker {}: failed to obtain session: {}", worker_id, e);
            return;
        }
    };

    tracing::debug!("Worker {} started", worker_id);

    while let Some(claim) = state.frontier.next_entry(|| state.budget_reached()).await {
        process_entry(worker_id, &state, &session, claim.entry(), &keyword, settings).await;
    }

    tracing::debug!("Worker {} finished", worker_id);
}

/// Fetches one frontier entry and, if its content is new, records it
async fn process_entry<S: Fetch>(
    worker_id: usize,
    state: &DigState,
    session: &S,
    entry: &FrontierEntry,
    keyword: &str,
    settings: WorkerSettings,
) {
    let url = unwrap_redirect(&entry.url);
    if url != entry.url {
        tracing::debug!("Worker {}: unwrapped {} -> {}", worker_id, entry.url, url);
    }

    let page = match session.get(&url).await {
        Ok(page) => page,
        Err(e) => {
            state.tally.fetch_failed();
            tracing::warn!("Worker {}: fetch failed for {}: {}", worker_id, url, e);
            return;
        }
    };

    let draft = PageDraft::new(url.clone(), page.headers, page.body);
    let admission = state.ledger().admit(draft);
    let record = match admission {
        Admission::Accepted(record) => record,
        Admission::Duplicate(existing) => {
            state.tally.duplicate();
            tracing::debug!(
                "Worker {}: duplicate content at {} (same as page {})",
                worker_id,
                url,
                existing
            );
            return;
        }
        Admission::BudgetExhausted => {
            state.tally.budget_dropped();
            tracing::debug!(
                "Worker {}: page budget spent, dropping {}",
                worker_id,
                url
            );
            return;
        }
    };

    // This acceptance may have spent the budget; idle workers re-check it
    state.frontier.wake_all();

    tracing::info!(
        "Worker {}: accepted page {} {} ({} links)",
        worker_id,
        record.id(),
        record.url(),
        record.links().len()
    );

    enqueue_links(state, &record, entry.depth, keyword, settings);
}

/// Pushes the keyword-matching links of a record back onto the frontier
fn enqueue_links(
    state: &DigState,
    record: &PageRecord,
    depth: u32,
    keyword: &str,
    settings: WorkerSettings,
) {
    let survivors = filter_links(record.links(), keyword);
    if survivors.is_empty() {
        return;
    }

    let child_depth = depth + 1;
    if child_depth > settings.max_depth {
        state.tally.depth_dropped(survivors.len());
        tracing::trace!(
            "Not following {} links from {}: depth {} exceeds {}",
            survivors.len(),
            record.url(),
            child_depth,
            settings.max_depth
        );
        return;
    }

    let count = survivors.len();
    for link in survivors {
        let url = if settings.resolve_relative_links {
            resolve_link(&link, record.url())
        } else {
            link
        };
        state.frontier.push(FrontierEntry::new(url, child_depth));
    }
    state.tally.enqueued(count);
}
