//! Cache storage backends
//!
//! A [`CacheStore`] is a TTL'd key/value store over raw response bytes.
//! The SQLite backend persists across renders (the CLI uses it); the
//! in-memory backend backs library embedding and tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::CacheError;

type Result<T> = std::result::Result<T, CacheError>;

/// TTL'd key/value store.
///
/// Implementations handle their own locking. Last write wins on a key;
/// there is no cross-key coordination.
pub trait CacheStore: Send + Sync {
    /// Get a value if present and not expired
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store a value with a TTL, replacing any previous entry
    fn put(&self, key: &str, data: &[u8], ttl: Duration) -> Result<()>;

    /// Drop every entry, returning how many were removed
    fn clear_all(&self) -> Result<usize>;

    /// Entry counts
    fn stats(&self) -> Result<CacheStats>;
}

/// Statistics about cache state
#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
}

/// In-memory store for library embedding and tests
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (Vec<u8>, i64)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, (Vec<u8>, i64)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = Utc::now().timestamp();
        Ok(self.lock().get(key).and_then(|(data, expires_at)| {
            (*expires_at > now).then(|| data.clone())
        }))
    }

    fn put(&self, key: &str, data: &[u8], ttl: Duration) -> Result<()> {
        let expires_at = Utc::now().timestamp() + ttl.as_secs() as i64;
        self.lock().insert(key.to_string(), (data.to_vec(), expires_at));
        Ok(())
    }

    fn clear_all(&self) -> Result<usize> {
        let mut entries = self.lock();
        let removed = entries.len();
        entries.clear();
        Ok(removed)
    }

    fn stats(&self) -> Result<CacheStats> {
        let now = Utc::now().timestamp();
        let entries = self.lock();
        let valid = entries.values().filter(|(_, exp)| *exp > now).count();
        Ok(CacheStats {
            total_entries: entries.len(),
            valid_entries: valid,
            expired_entries: entries.len() - valid,
        })
    }
}

/// SQLite-backed store at the XDG cache location
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Open or create the store at the default cache location
    pub fn open() -> Result<Self> {
        Self::open_at(&Self::cache_dir()?)
    }

    /// Get the cache directory path (~/.cache/zkillstats on Linux/macOS)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("zkillstats"))
    }

    /// Open the store at a specific directory (for testing)
    pub fn open_at(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let conn = Connection::open(cache_dir.join("cache.db"))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                cache_key TEXT PRIMARY KEY NOT NULL,
                data BLOB NOT NULL,
                created_at INTEGER NOT NULL,
                expires_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_expires_at ON cache_entries(expires_at);
            "#,
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CacheStore for SqliteCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = Utc::now().timestamp();
        let data = self
            .lock()
            .query_row(
                "SELECT data FROM cache_entries
                 WHERE cache_key = ?1 AND expires_at > ?2",
                params![key, now],
                |row| row.get(0),
            )
            .optional()?;
        Ok(data)
    }

    fn put(&self, key: &str, data: &[u8], ttl: Duration) -> Result<()> {
        let now = Utc::now().timestamp();
        let expires = now + ttl.as_secs() as i64;

        self.lock().execute(
            "INSERT OR REPLACE INTO cache_entries (cache_key, data, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![key, data, now, expires],
        )?;
        Ok(())
    }

    fn clear_all(&self) -> Result<usize> {
        let conn = self.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM cache_entries", [], |r| r.get(0))?;
        conn.execute("DELETE FROM cache_entries", [])?;
        Ok(count as usize)
    }

    fn stats(&self) -> Result<CacheStats> {
        let now = Utc::now().timestamp();
        let conn = self.lock();

        let total: i64 = conn.query_row("SELECT COUNT(*) FROM cache_entries", [], |r| r.get(0))?;
        let valid: i64 = conn.query_row(
            "SELECT COUNT(*) FROM cache_entries WHERE expires_at > ?1",
            [now],
            |r| r.get(0),
        )?;

        Ok(CacheStats {
            total_entries: total as usize,
            valid_entries: valid as usize,
            expired_entries: (total - valid) as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sqlite_store() -> (SqliteCache, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SqliteCache::open_at(dir.path()).unwrap();
        (store, dir)
    }

    fn exercise_put_get(store: &dyn CacheStore) {
        store
            .put("key1", b"payload", Duration::from_secs(60))
            .unwrap();
        assert_eq!(store.get("key1").unwrap(), Some(b"payload".to_vec()));
        assert_eq!(store.get("other").unwrap(), None);
    }

    fn exercise_expiry(store: &dyn CacheStore) {
        store.put("key2", b"stale", Duration::from_secs(0)).unwrap();
        assert_eq!(store.get("key2").unwrap(), None);
    }

    fn exercise_overwrite(store: &dyn CacheStore) {
        store.put("key3", b"old", Duration::from_secs(60)).unwrap();
        store.put("key3", b"new", Duration::from_secs(60)).unwrap();
        assert_eq!(store.get("key3").unwrap(), Some(b"new".to_vec()));
    }

    #[test]
    fn test_memory_put_get() {
        exercise_put_get(&MemoryCache::new());
    }

    #[test]
    fn test_memory_expiry() {
        exercise_expiry(&MemoryCache::new());
    }

    #[test]
    fn test_memory_overwrite() {
        exercise_overwrite(&MemoryCache::new());
    }

    #[test]
    fn test_sqlite_put_get() {
        let (store, _dir) = sqlite_store();
        exercise_put_get(&store);
    }

    #[test]
    fn test_sqlite_expiry() {
        let (store, _dir) = sqlite_store();
        exercise_expiry(&store);
    }

    #[test]
    fn test_sqlite_overwrite() {
        let (store, _dir) = sqlite_store();
        exercise_overwrite(&store);
    }

    #[test]
    fn test_clear_all_and_stats() {
        let (store, _dir) = sqlite_store();

        store.put("k1", b"d1", Duration::from_secs(60)).unwrap();
        store.put("k2", b"d2", Duration::from_secs(0)).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.valid_entries, 1);
        assert_eq!(stats.expired_entries, 1);

        assert_eq!(store.clear_all().unwrap(), 2);
        assert_eq!(store.stats().unwrap().total_entries, 0);
    }

    #[test]
    fn test_sqlite_reopen_persists() {
        let dir = TempDir::new().unwrap();
        {
            let store = SqliteCache::open_at(dir.path()).unwrap();
            store
                .put("key", b"persisted", Duration::from_secs(60))
                .unwrap();
        }

        let store = SqliteCache::open_at(dir.path()).unwrap();
        assert_eq!(store.get("key").unwrap(), Some(b"persisted".to_vec()));
    }
}
