//! Trait definitions for external capabilities
//!
//! These traits define the boundaries between pipeline logic and
//! infrastructure. Implementations live in other crates (`dossier-llm`,
//! `dossier-web`, `dossier-cache`) and are injected at construction; the
//! pipeline never reaches for ambient globals.

use crate::chat::ChatMessage;
use crate::source::SearchResult;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Error from the text-generation capability.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Network or API communication error.
    #[error("communication error: {0}")]
    Communication(String),
    /// The capability took too long to answer.
    #[error("generation timed out")]
    Timeout,
    /// Response did not match its JSON contract.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Error from the search capability.
///
/// A search failure aborts only the owning intent's candidate selection,
/// never the whole run.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Missing or rejected credentials.
    #[error("credentials error: {0}")]
    Credentials(String),
    /// Network or API communication error.
    #[error("communication error: {0}")]
    Communication(String),
    /// Response could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Error from readable-text extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Input was not usable HTML.
    #[error("malformed document: {0}")]
    Malformed(String),
    /// No readable text survived extraction.
    #[error("no readable content")]
    Empty,
}

/// Error from the artifact cache.
///
/// Absence of a key is never an error; `get` returns `Ok(None)`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backing store failure.
    #[error("store error: {0}")]
    Store(String),
    /// Stored value could not be decoded.
    #[error("invalid cached value: {0}")]
    InvalidValue(String),
}

/// Result of fetching a page.
///
/// The fetch capability never fails: any transport-level problem (timeout,
/// DNS, TLS) is encoded as `status == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status, or 0 on total failure.
    pub status: u16,
    /// Content-Type header value, empty if absent.
    pub content_type: String,
    /// Response body.
    pub html: String,
}

impl FetchedPage {
    /// The canonical total-failure value.
    pub fn failure() -> Self {
        Self {
            status: 0,
            content_type: String::new(),
            html: String::new(),
        }
    }

    /// Whether this page is a usable HTML document: 2xx status, HTML
    /// content type, non-empty body.
    pub fn is_usable_html(&self) -> bool {
        (200..300).contains(&self.status)
            && (self.content_type.contains("text/html")
                || self.content_type.contains("application/xhtml"))
            && !self.html.is_empty()
    }
}

/// Result of extracting readable text from a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDoc {
    /// Page title, or a fallback derived from the URL.
    pub title: String,
    /// Readable text.
    pub text: String,
    /// Short excerpt of the readable text.
    pub excerpt: String,
    /// Fingerprint of the readable text.
    pub content_hash: String,
}

/// Token callback used by [`GenerationProvider::stream_chat`].
pub type TokenSink<'a> = &'a mut (dyn FnMut(&str) + Send);

/// Text-generation capability.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate a complete response for the conversation.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String, GenerationError>;

    /// Generate a response, delivering chunks in order through `on_token`.
    ///
    /// Returns the full response text once the stream completes.
    async fn stream_chat(
        &self,
        messages: &[ChatMessage],
        temperature: f32,
        on_token: TokenSink<'_>,
    ) -> Result<String, GenerationError>;
}

/// Web search capability.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a query and return up to `k` ordered results.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<SearchResult>, SearchError>;
}

/// Page fetch capability. Infallible by contract.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a URL. Never fails; see [`FetchedPage::failure`].
    async fn fetch(&self, url: &str) -> FetchedPage;
}

/// HTML-to-readable-text extraction capability.
///
/// Extraction is CPU-bound and synchronous. It may fail on malformed input;
/// callers catch the error and skip the page.
pub trait TextExtractor: Send + Sync {
    /// Extract readable text from an HTML document.
    fn extract(&self, html: &str, url: &str) -> Result<ExtractedDoc, ExtractError>;
}

/// Key-value artifact cache with per-entry TTL.
#[async_trait]
pub trait ArtifactCache: Send + Sync {
    /// Look up a key. Absence is `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a value under a key for `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}
