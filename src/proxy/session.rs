//! reqwest-backed session provider
//!
//! This module handles:
//! - Building HTTP clients that resolve and connect through the Tor SOCKS proxy
//! - GET requests with status checking
//! - Error classification into network and unexpected failures

use crate::config::ProxyConfig;
use crate::proxy::{Fetch, FetchedPage, SessionProvider};
use crate::{FetchError, FetchResult};
use reqwest::{Client, Proxy};
use std::time::Duration;

/// Builds an HTTP client, optionally routed through a SOCKS proxy
///
/// # Arguments
///
/// * `proxy_url` - SOCKS proxy URL (e.g. `socks5h://127.0.0.1:9050`), or `None`
///   for a direct client
/// * `request_timeout` - Whole-request timeout
/// * `connect_timeout` - Connect timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    proxy_url: Option<&str>,
    request_timeout: Duration,
    connect_timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .timeout(request_timeout)
        .connect_timeout(connect_timeout)
        .gzip(true)
        .brotli(true);

    if let Some(proxy_url) = proxy_url {
        builder = builder.proxy(Proxy::all(proxy_url)?);
    }

    builder.build()
}

/// Session provider backed by the Tor SOCKS proxy
#[derive(Debug, Clone)]
pub struct TorSessionProvider {
    proxy_url: Option<String>,
    request_timeout: Duration,
    connect_timeout: Duration,
}

impl TorSessionProvider {
    /// Creates a provider that routes every request through the configured proxy
    ///
    /// `socks5h` is used so that host names (including `.onion` addresses) are
    /// resolved by Tor rather than locally.
    pub fn from_config(config: &ProxyConfig) -> Self {
        Self {
            proxy_url: Some(format!("socks5h://{}:{}", config.host, config.port)),
            request_timeout: Duration::from_secs(config.request_timeout),
            connect_timeout: Duration::from_secs(config.connect_timeout),
        }
    }

    /// Creates a provider that talks to the network directly
    ///
    /// Useful for clearnet mirrors and for local test servers.
    pub fn without_proxy(request_timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            proxy_url: None,
            request_timeout,
            connect_timeout,
        }
    }

    /// The proxy URL requests are routed through, if any
    pub fn proxy_url(&self) -> Option<&str> {
        self.proxy_url.as_deref()
    }
}

impl SessionProvider for TorSessionProvider {
    type Session = TorSession;

    fn obtain_session(&self) -> crate::Result<TorSession> {
        let client = build_http_client(
            self.proxy_url.as_deref(),
            self.request_timeout,
            self.connect_timeout,
        )?;
        Ok(TorSession { client })
    }
}

/// A ready-to-use HTTP session
#[derive(Debug, Clone)]
pub struct TorSession {
    client: Client,
}

impl Fetch for TorSession {
    async fn get(&self, url: &str) -> FetchResult<FetchedPage> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let headers = response.headers().clone();
        let body = response.text().await?;

        Ok(FetchedPage { body, headers })
    }
}
