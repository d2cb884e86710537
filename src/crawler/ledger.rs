//! Crawl ledger: dedup index, page budget and id allocation
//!
//! All of this state sits behind one mutex owned by the engine. [`Ledger::admit`]
//! is the only place a page is accepted: the duplicate check, the budget check,
//! id allocation and the record push happen in one call, so a content hash can
//! never be accepted twice, the page budget can never be exceeded, and every
//! claimed hash has its record.

use crate::crawler::record::{PageDraft, PageRecord};
use std::collections::HashMap;
use std::sync::Arc;

/// Decision for a freshly fetched page
#[derive(Debug, Clone)]
pub enum Admission {
    /// The page is new and has been recorded
    Accepted(Arc<PageRecord>),
    /// Same content was already accepted under this id
    Duplicate(u64),
    /// The page budget is spent
    BudgetExhausted,
}

#[derive(Debug)]
pub struct Ledger {
    max_pages: usize,
    seen: HashMap<String, u64>,
    records: Vec<Arc<PageRecord>>,
}

impl Ledger {
    pub fn new(max_pages: usize) -> Self {
        Self {
            max_pages,
            seen: HashMap::new(),
            records: Vec::new(),
        }
    }

    /// Number of accepted pages; ids run from 0 to this value
    pub fn pages_crawled(&self) -> usize {
        self.records.len()
    }

    pub fn budget_reached(&self) -> bool {
        self.pages_crawled() >= self.max_pages
    }

    /// Records a draft if its content is new and the budget allows
    pub fn admit(&mut self, draft: PageDraft) -> Admission {
        if let Some(&id) = self.seen.get(draft.hash()) {
            return Admission::Duplicate(id);
        }
        if self.budget_reached() {
            return Admission::BudgetExhausted;
        }

        // Build first; nothing below can leave the ledger half-updated
        let id = self.records.len() as u64;
        let record = Arc::new(draft.into_record(id));

        self.seen.insert(record.hash().to_string(), id);
        self.records.push(Arc::clone(&record));
        Admission::Accepted(record)
    }

    /// Accepted records in id order
    pub fn records(&self) -> &[Arc<PageRecord>] {
        &self.records
    }

    /// Record accepted for a content hash
    pub fn record_for_hash(&self, hash: &str) -> Option<Arc<PageRecord>> {
        let id = *self.seen.get(hash)?;
        self.records.get(id as usize).cloned()
    }

    /// Number of distinct hashes claimed
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}
