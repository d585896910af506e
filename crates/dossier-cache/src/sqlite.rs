//! SQLite-backed durable artifact cache

use crate::unix_now;
use async_trait::async_trait;
use dossier_domain::traits::{ArtifactCache, CacheError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

/// Durable artifact cache over a single SQLite database.
///
/// Expiry is lazy: expired rows are deleted when read, and
/// [`SqliteCache::sweep`] removes everything expired in one pass.
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Open (or create) a cache database at `path`. Use `":memory:"` for an
    /// ephemeral database in tests.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let conn = Connection::open(path).map_err(|e| CacheError::Store(e.to_string()))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS artifacts (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                expires_at INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_artifacts_expires
                ON artifacts(expires_at);",
        )
        .map_err(|e| CacheError::Store(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Delete all expired rows, returning how many were removed.
    pub fn sweep(&self) -> Result<usize, CacheError> {
        let conn = self.conn.lock().unwrap();
        let removed = conn
            .execute(
                "DELETE FROM artifacts WHERE expires_at <= ?1",
                params![unix_now()],
            )
            .map_err(|e| CacheError::Store(e.to_string()))?;
        debug!(removed, "cache sweep complete");
        Ok(removed)
    }
}

#[async_trait]
impl ArtifactCache for SqliteCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let conn = self.conn.lock().unwrap();
        let row: Option<(String, u64)> = conn
            .query_row(
                "SELECT value, expires_at FROM artifacts WHERE key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(|e| CacheError::Store(e.to_string()))?;

        match row {
            Some((value, expires_at)) if expires_at > unix_now() => Ok(Some(value)),
            Some(_) => {
                conn.execute("DELETE FROM artifacts WHERE key = ?1", params![key])
                    .map_err(|e| CacheError::Store(e.to_string()))?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let expires_at = unix_now().saturating_add(ttl.as_secs());
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO artifacts (key, value, expires_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, expires_at = ?3",
            params![key, value, expires_at],
        )
        .map_err(|e| CacheError::Store(e.to_string()))?;
        Ok(())
    }
}
