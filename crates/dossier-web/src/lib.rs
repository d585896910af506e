//! Dossier Web Capability Layer
//!
//! Implementations of the search, fetch, and extraction traits from
//! `dossier-domain`:
//!
//! - `HttpSearch`: JSON search API client (Serper-compatible shape)
//! - `HttpFetcher`: page fetcher with dual timeouts; never fails by contract
//! - `ReadabilityExtractor`: HTML-to-readable-text extraction with content
//!   hashing
//! - `stub`: deterministic in-memory implementations for tests

#![warn(missing_docs)]

pub mod fetch;
pub mod readability;
pub mod search;
pub mod stub;

pub use fetch::HttpFetcher;
pub use readability::content_hash;
pub use readability::ReadabilityExtractor;
pub use search::HttpSearch;
pub use stub::{StubExtractor, StubFetcher, StubSearch};
