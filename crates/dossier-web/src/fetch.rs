//! Never-failing page fetcher
//!
//! The fetch capability degrades every failure to `FetchedPage::failure()`
//! (`status == 0`) instead of propagating errors. Three time bounds apply:
//! a connect timeout, a full-request timeout inside the client, and an outer
//! hard abort that also covers body streaming.

use async_trait::async_trait;
use dossier_domain::traits::{FetchedPage, PageFetcher};
use std::time::Duration;
use tracing::debug;

/// Default connect-phase timeout.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default full-request timeout inside the client.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default outer hard-abort bound.
pub const DEFAULT_HARD_TIMEOUT_SECS: u64 = 12;

/// Maximum body size retained, in bytes. Larger bodies are truncated.
pub const MAX_BODY_BYTES: usize = 2_000_000;

/// HTTP page fetcher implementing the infallible fetch contract.
pub struct HttpFetcher {
    client: reqwest::Client,
    hard_timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with default timeouts.
    pub fn new() -> Self {
        Self::with_timeouts(
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_HARD_TIMEOUT_SECS),
        )
    }

    /// Create a fetcher with explicit connect, request, and hard-abort
    /// timeouts.
    pub fn with_timeouts(connect: Duration, request: Duration, hard: Duration) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(connect)
            .timeout(request)
            .user_agent("dossier/0.1")
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("default reqwest client");

        Self {
            client,
            hard_timeout: hard,
        }
    }

    async fn fetch_inner(&self, url: &str) -> Option<FetchedPage> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return None;
        }

        let response = self.client.get(url).send().await.ok()?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let mut html = response.text().await.ok()?;
        if html.len() > MAX_BODY_BYTES {
            // Truncate on a char boundary.
            let mut end = MAX_BODY_BYTES;
            while !html.is_char_boundary(end) {
                end -= 1;
            }
            html.truncate(end);
        }

        Some(FetchedPage {
            status,
            content_type,
            html,
        })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchedPage {
        let result = tokio::time::timeout(self.hard_timeout, self.fetch_inner(url)).await;
        match result {
            Ok(Some(page)) => page,
            Ok(None) => {
                debug!(url, "fetch failed, degrading to status 0");
                FetchedPage::failure()
            }
            Err(_) => {
                debug!(url, "fetch hard timeout, degrading to status 0");
                FetchedPage::failure()
            }
        }
    }
}
