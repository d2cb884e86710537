//! Network session provider for the crawler
//!
//! The crawl engine never builds HTTP clients itself. It asks a
//! [`SessionProvider`] for a session and issues every request through the
//! returned [`Fetch`] capability. The production provider routes through a
//! local Tor SOCKS proxy; tests substitute in-memory fetchers.
//!
//! - `session`: reqwest-backed provider and session
//! - `daemon`: lifecycle of the Tor process the proxy runs in

mod daemon;
mod session;

pub use daemon::{DaemonStatus, TorDaemon};
pub use session::{build_http_client, TorSession, TorSessionProvider};

use crate::FetchResult;
use reqwest::header::HeaderMap;
use std::future::Future;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Response body as text
    pub body: String,

    /// Response headers (case-insensitive by name)
    pub headers: HeaderMap,
}

/// Capability to fetch a URL
///
/// Implementations must be shareable across worker tasks.
pub trait Fetch: Send + Sync + 'static {
    /// Fetches `url`, failing on transport errors and non-success statuses
    fn get(&self, url: &str) -> impl Future<Output = FetchResult<FetchedPage>> + Send;
}

/// Source of ready-to-use fetch sessions
pub trait SessionProvider: Send + Sync + 'static {
    type Session: Fetch;

    /// Returns a session configured for the provider's network
    fn obtain_session(&self) -> crate::Result<Self::Session>;
}
