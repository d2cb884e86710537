//! Crawler module: the crawl engine and its parts
//!
//! This module contains the core crawling logic, including:
//! - The shared frontier and its quiescence tracking
//! - The ledger guarding dedup, page budget and id allocation
//! - Page records and HTML link extraction
//! - The worker pool that ties them together

mod engine;
mod frontier;
mod ledger;
mod parser;
mod record;
mod tally;

pub use engine::{Digger, RunInfo};
pub use frontier::{Claim, Frontier, FrontierEntry, Pop};
pub use ledger::{Admission, Ledger};
pub use parser::extract_links;
pub use record::{content_hash, PageDraft, PageExport, PageRecord};
pub use tally::CrawlTally;
