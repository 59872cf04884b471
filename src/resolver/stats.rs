//! Lookup counters

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Running counters, updated by the resolver
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    stale: AtomicU64,
    partial: AtomicU64,
    remote_fetches: AtomicU64,
    cache_errors: AtomicU64,
}

/// Point-in-time copy of the resolver counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolverStats {
    /// Lookups answered from cache
    pub hits: u64,
    /// Lookups with no cache entry
    pub misses: u64,
    /// Entries refetched because they were too old
    pub stale: u64,
    /// Entries refetched because a requested capability was missing
    pub partial: u64,
    pub remote_fetches: u64,
    /// Cache reads or writes that failed and were ignored
    pub cache_errors: u64,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Event {
    Hit,
    Miss,
    Stale,
    Partial,
    RemoteFetch,
    CacheError,
}

impl StatsCounters {
    pub(crate) fn record(&self, event: Event) {
        let counter = match event {
            Event::Hit => &self.hits,
            Event::Miss => &self.misses,
            Event::Stale => &self.stale,
            Event::Partial => &self.partial,
            Event::RemoteFetch => &self.remote_fetches,
            Event::CacheError => &self.cache_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> ResolverStats {
        ResolverStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
            partial: self.partial.load(Ordering::Relaxed),
            remote_fetches: self.remote_fetches.load(Ordering::Relaxed),
            cache_errors: self.cache_errors.load(Ordering::Relaxed),
        }
    }
}
