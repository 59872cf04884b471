//! SQLite-based persistent device cache
//!
//! One row per lookup key holding the serialized record and its write time.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use super::{CacheEntry, CacheStore, LookupKey};
use crate::error::CacheError;
use crate::models::DeviceRecord;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

type Result<T> = std::result::Result<T, CacheError>;

/// SQLite-backed device cache
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Open or create the cache at the default XDG cache location
    pub fn open() -> Result<Self> {
        let cache_dir = Self::cache_dir()?;
        Self::open_at(&cache_dir)
    }

    /// Get the cache directory path (~/.cache/wurfl-cloud on Linux)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("wurfl-cloud"))
    }

    /// Open the cache in a specific directory
    pub fn open_at(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join("devices.db");
        let conn = Connection::open(&db_path)?;

        // Check schema version - nuke if mismatched
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            std::fs::remove_file(&db_path)
                .map_err(|e| CacheError::Io(format!("Failed to remove cache DB: {}", e)))?;
            return Self::open_at(cache_dir);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS devices (
                lookup_key TEXT PRIMARY KEY NOT NULL,
                device_id TEXT NOT NULL,
                record TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                size_bytes INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_created_at ON devices(created_at);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| CacheError::Poisoned)
    }

    /// Delete a specific entry
    pub fn delete(&self, key: &LookupKey) -> Result<bool> {
        let deleted = self
            .conn()?
            .execute("DELETE FROM devices WHERE lookup_key = ?1", [key.as_str()])?;
        Ok(deleted > 0)
    }

    /// Clear all cache entries
    pub fn clear_all(&self) -> Result<ClearStats> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM devices", [], |r| r.get(0))?;
        conn.execute("DELETE FROM devices", [])?;

        Ok(ClearStats {
            entries_removed: count as usize,
        })
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        let conn = self.conn()?;

        let total_entries: i64 =
            conn.query_row("SELECT COUNT(*) FROM devices", [], |r| r.get(0))?;

        let total_size: i64 = conn.query_row(
            "SELECT COALESCE(SUM(size_bytes), 0) FROM devices",
            [],
            |r| r.get(0),
        )?;

        let (oldest, newest): (Option<i64>, Option<i64>) = conn.query_row(
            "SELECT MIN(created_at), MAX(created_at) FROM devices",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )?;

        Ok(CacheStats {
            total_entries: total_entries as usize,
            total_size_bytes: total_size as usize,
            oldest_entry: oldest,
            newest_entry: newest,
        })
    }
}

impl CacheStore for SqliteCache {
    fn get(&self, key: &LookupKey) -> Result<Option<CacheEntry>> {
        let conn = self.conn()?;

        let row: Option<(String, i64)> = conn
            .query_row(
                "SELECT record, created_at FROM devices WHERE lookup_key = ?1",
                params![key.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((data, created_at)) = row else {
            return Ok(None);
        };

        match serde_json::from_str::<DeviceRecord>(&data) {
            Ok(record) => {
                let age_secs = (Utc::now().timestamp() - created_at).max(0) as u64;
                Ok(Some(CacheEntry::new(record, Duration::from_secs(age_secs))))
            }
            Err(e) => {
                log::warn!("Discarding unreadable cache entry {}: {}", key, e);
                let _ = conn.execute("DELETE FROM devices WHERE lookup_key = ?1", [key.as_str()]);
                Ok(None)
            }
        }
    }

    fn put(&self, key: &LookupKey, record: &DeviceRecord) -> Result<()> {
        let data = serde_json::to_string(record)?;
        let now = Utc::now().timestamp();

        self.conn()?.execute(
            "INSERT OR REPLACE INTO devices
             (lookup_key, device_id, record, created_at, size_bytes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![key.as_str(), record.id, data, now, data.len()],
        )?;
        Ok(())
    }
}

/// Statistics about cache clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_size_bytes: usize,
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
}
