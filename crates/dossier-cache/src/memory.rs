//! In-process artifact cache

use crate::unix_now;
use async_trait::async_trait;
use dossier_domain::traits::{ArtifactCache, CacheError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: u64,
}

/// In-process TTL cache.
///
/// Entries are evicted lazily: an expired entry is removed on the next read
/// of its key. Suitable as a per-process fallback when no durable store is
/// configured.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        let now = unix_now();
        self.entries
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    /// Whether the cache holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ArtifactCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if entry.expires_at > unix_now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                debug!(key, "cache entry expired");
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: unix_now().saturating_add(ttl.as_secs()),
        };
        self.entries.lock().unwrap().insert(key.to_string(), entry);
        Ok(())
    }
}
