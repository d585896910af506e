//! Search results and evidence sources

use serde::{Deserialize, Serialize};

/// A single result from the search capability.
///
/// Not persisted; only used for candidate selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title.
    pub title: String,
    /// Result URL.
    pub link: String,
    /// Short snippet describing the result.
    pub snippet: String,
}

/// A fetched and extracted web page contributing text to the answer.
///
/// Within one run, sources are unique by `content_hash` and capped at the
/// retriever's `max_sources`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSource {
    /// Page URL as fetched.
    pub url: String,
    /// Extracted page title.
    pub title: String,
    /// Normalized domain of the URL.
    pub domain: String,
    /// Short excerpt of the readable text.
    pub excerpt: String,
    /// Full readable text.
    pub text: String,
    /// Fingerprint of the readable text, used for deduplication.
    pub content_hash: String,
}

/// Normalize a URL down to its domain for diversity checks.
///
/// Strips the scheme and a leading `www.`, lowercases, and drops everything
/// after the first slash.
///
/// # Examples
///
/// ```
/// use dossier_domain::normalized_domain;
///
/// assert_eq!(normalized_domain("https://www.example.com/page"), "example.com");
/// assert_eq!(normalized_domain("http://Docs.RS/serde"), "docs.rs");
/// assert_eq!(normalized_domain("example.org"), "example.org");
/// ```
pub fn normalized_domain(url: &str) -> String {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let host = rest.split('/').next().unwrap_or(rest);
    let host = host.strip_prefix("www.").unwrap_or(host);
    host.to_ascii_lowercase()
}
