//! Deterministic stub capabilities for tests
//!
//! These mirror the real implementations' contracts without any network
//! access. They are public API, like the mock generation provider, so
//! downstream crates can exercise full pipeline runs deterministically.

use async_trait::async_trait;
use dossier_domain::normalized_domain;
use dossier_domain::traits::{
    ExtractError, ExtractedDoc, FetchedPage, PageFetcher, SearchError, SearchProvider,
    TextExtractor,
};
use dossier_domain::SearchResult;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::readability::content_hash;

/// Scripted search capability.
///
/// Returns configured results per query, falling back to a default list.
/// Queries registered as failing return [`SearchError::Communication`].
#[derive(Debug, Clone, Default)]
pub struct StubSearch {
    by_query: HashMap<String, Vec<SearchResult>>,
    default_results: Vec<SearchResult>,
    failing: bool,
    call_count: Arc<Mutex<usize>>,
}

impl StubSearch {
    /// Create a stub returning `default_results` for every query.
    pub fn new(default_results: Vec<SearchResult>) -> Self {
        Self {
            by_query: HashMap::new(),
            default_results,
            failing: false,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Create a stub that fails every query.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Register results for a specific query.
    pub fn with_results(mut self, query: impl Into<String>, results: Vec<SearchResult>) -> Self {
        self.by_query.insert(query.into(), results);
        self
    }

    /// Number of search calls made so far.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl SearchProvider for StubSearch {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>, SearchError> {
        *self.call_count.lock().unwrap() += 1;
        if self.failing {
            return Err(SearchError::Communication("stub search failure".into()));
        }
        let results = self
            .by_query
            .get(query)
            .unwrap_or(&self.default_results)
            .iter()
            .take(k)
            .cloned()
            .collect();
        Ok(results)
    }
}

/// Scripted page fetcher. URLs without a registered page degrade to
/// `status == 0`, matching the real fetcher's contract.
#[derive(Debug, Clone, Default)]
pub struct StubFetcher {
    pages: HashMap<String, FetchedPage>,
    call_count: Arc<Mutex<usize>>,
}

impl StubFetcher {
    /// Create an empty stub; every fetch fails until pages are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a successful HTML page for a URL.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(
            url.into(),
            FetchedPage {
                status: 200,
                content_type: "text/html; charset=utf-8".to_string(),
                html: html.into(),
            },
        );
        self
    }

    /// Register an arbitrary response for a URL.
    pub fn with_response(mut self, url: impl Into<String>, page: FetchedPage) -> Self {
        self.pages.insert(url.into(), page);
        self
    }

    /// Number of fetch calls made so far.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> FetchedPage {
        *self.call_count.lock().unwrap() += 1;
        self.pages
            .get(url)
            .cloned()
            .unwrap_or_else(FetchedPage::failure)
    }
}

/// Pass-through extractor: treats the page body as already-readable text.
///
/// Bodies containing the marker `<!--malformed-->` fail extraction, so tests
/// can exercise the catch-and-skip path.
#[derive(Debug, Clone, Default)]
pub struct StubExtractor;

impl StubExtractor {
    /// Create a pass-through extractor.
    pub fn new() -> Self {
        Self
    }

    /// The marker that makes extraction fail for a body.
    pub const MALFORMED_MARKER: &'static str = "<!--malformed-->";
}

impl TextExtractor for StubExtractor {
    fn extract(&self, html: &str, url: &str) -> Result<ExtractedDoc, ExtractError> {
        if html.contains(Self::MALFORMED_MARKER) {
            return Err(ExtractError::Malformed("stub marker present".to_string()));
        }
        let text = html.trim().to_string();
        if text.is_empty() {
            return Err(ExtractError::Empty);
        }
        let excerpt: String = text.chars().take(300).collect();
        Ok(ExtractedDoc {
            title: normalized_domain(url),
            content_hash: content_hash(&text),
            excerpt,
            text,
        })
    }
}
