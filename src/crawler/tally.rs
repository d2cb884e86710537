use std::sync::atomic::{AtomicUsize, Ordering};

/// Running counters of what happened to each frontier entry
///
/// Reporting only; not guarded by the ledger lock.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    fetch_failures: AtomicUsize,
    duplicates: AtomicUsize,
    budget_drops: AtomicUsize,
    depth_drops: AtomicUsize,
    links_enqueued: AtomicUsize,
}

impl Tally {
    pub(crate) fn fetch_failed(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn duplicate(&self) {
        self.duplicates.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn budget_dropped(&self) {
        self.budget_drops.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn depth_dropped(&self, count: usize) {
        self.depth_drops.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn enqueued(&self, count: usize) {
        self.links_enqueued.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, accepted: usize) -> CrawlTally {
        CrawlTally {
            accepted,
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            duplicates: self.duplicates.load(Ordering::Relaxed),
            budget_drops: self.budget_drops.load(Ordering::Relaxed),
            depth_drops: self.depth_drops.load(Ordering::Relaxed),
            links_enqueued: self.links_enqueued.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the crawl counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlTally {
    /// Pages accepted as new records
    pub accepted: usize,
    /// Fetches that failed (transport error or non-success status)
    pub fetch_failures: usize,
    /// Fetches whose content had already been accepted
    pub duplicates: usize,
    /// New pages fetched after the budget was spent
    pub budget_drops: usize,
    /// Keyword-matching links not queued because they were too deep
    pub depth_drops: usize,
    /// Links pushed back onto the frontier
    pub links_enqueued: usize,
}

impl CrawlTally {
    /// Number of frontier entries that were actually fetched or attempted
    pub fn attempted(&self) -> usize {
        self.accepted + self.fetch_failures + self.duplicates + self.budget_drops
    }
}
