//! In-process cache backed by a HashMap

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Instant;

use super::{CacheEntry, CacheStore, LookupKey};
use crate::error::CacheError;
use crate::models::DeviceRecord;

struct Slot {
    record: DeviceRecord,
    written_at: Instant,
}

/// Process-local cache. Entry age is measured from insertion.
///
/// With a capacity set, inserting into a full cache evicts the oldest entry.
/// A capacity of zero stores nothing.
pub struct MemoryCache {
    entries: Mutex<HashMap<LookupKey, Slot>>,
    max_entries: Option<usize>,
}

impl MemoryCache {
    pub fn new(max_entries: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &LookupKey) -> Result<Option<CacheEntry>, CacheError> {
        let entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        Ok(entries
            .get(key)
            .map(|slot| CacheEntry::new(slot.record.clone(), slot.written_at.elapsed())))
    }

    fn put(&self, key: &LookupKey, record: &DeviceRecord) -> Result<(), CacheError> {
        if self.max_entries == Some(0) {
            return Ok(());
        }

        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;

        if let Some(max) = self.max_entries
            && !entries.contains_key(key)
            && entries.len() >= max
        {
            let oldest = entries
                .iter()
                .min_by_key(|(_, slot)| slot.written_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                log::debug!("Memory cache full, evicting {}", oldest);
                entries.remove(&oldest);
            }
        }

        entries.insert(
            key.clone(),
            Slot {
                record: record.clone(),
                written_at: Instant::now(),
            },
        );
        Ok(())
    }
}
