//! Local cache for resolved device records
//!
//! The resolver only depends on the [`CacheStore`] contract. Three backends ship
//! with the crate: [`NullCache`] (always miss), [`MemoryCache`] (process-local)
//! and [`SqliteCache`] (persistent, shared between CLI runs).

pub mod key;
pub mod memory;
pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use crate::config::{CacheBackend, CacheConfig};
use crate::error::CacheError;
use crate::models::DeviceRecord;

pub use key::LookupKey;
pub use memory::MemoryCache;
pub use storage::SqliteCache;

/// A cached device record together with its age.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub record: DeviceRecord,
    age: Duration,
}

impl CacheEntry {
    pub fn new(record: DeviceRecord, age: Duration) -> Self {
        Self { record, age }
    }

    /// Time since the entry was written
    pub fn age(&self) -> Duration {
        self.age
    }

    /// True when the entry is older than `max_age`
    pub fn is_stale(&self, max_age: Duration) -> bool {
        self.age > max_age
    }
}

/// Storage contract for resolved device records.
///
/// Implementations must be safe to share between concurrent lookups. `put` is
/// last-write-wins. Errors are reported to the resolver, which treats them as a
/// miss.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &LookupKey) -> Result<Option<CacheEntry>, CacheError>;

    fn put(&self, key: &LookupKey, record: &DeviceRecord) -> Result<(), CacheError>;
}

/// Cache that never stores anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCache;

impl CacheStore for NullCache {
    fn get(&self, _key: &LookupKey) -> Result<Option<CacheEntry>, CacheError> {
        Ok(None)
    }

    fn put(&self, _key: &LookupKey, _record: &DeviceRecord) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Build the cache backend selected by configuration.
pub fn open_cache(config: &CacheConfig) -> Result<Arc<dyn CacheStore>, CacheError> {
    let store: Arc<dyn CacheStore> = match config.backend {
        CacheBackend::Null => Arc::new(NullCache),
        CacheBackend::Memory => Arc::new(MemoryCache::new(config.max_entries)),
        CacheBackend::Sqlite => match config.path {
            Some(ref dir) => Arc::new(SqliteCache::open_at(dir)?),
            None => Arc::new(SqliteCache::open()?),
        },
    };
    log::debug!("Opened {:?} cache", config.backend);
    Ok(store)
}
