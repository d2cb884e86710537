//! URL handling module for Onion-Digger
//!
//! This module provides the small URL transformations the crawl loop applies:
//! redirect-wrapper unwrapping, keyword filtering of discovered links, relative
//! link resolution, and host extraction for reporting.

mod domain;
mod filter;
mod redirect;

// Re-export main functions
pub use domain::{extract_domain, is_onion_host};
pub use filter::{filter_links, resolve_link};
pub use redirect::{unwrap_redirect, REDIRECT_PARAM};
