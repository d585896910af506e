//! Dossier Artifact Cache
//!
//! Implementations of the `ArtifactCache` trait from `dossier-domain`:
//!
//! - [`MemoryCache`]: in-process map with per-entry expiry; the fallback
//!   when no durable store is configured
//! - [`SqliteCache`]: durable SQLite-backed store with lazy expiry
//!
//! The backend is chosen once at construction and injected into the
//! pipeline; nothing in this crate is reachable through ambient globals.
//! For both backends, absence of a key is `Ok(None)`, never an error.

#![warn(missing_docs)]

pub mod memory;
pub mod sqlite;

pub use memory::MemoryCache;
pub use sqlite::SqliteCache;

/// Current Unix time in seconds.
pub(crate) fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
