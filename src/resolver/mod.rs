//! Cache-first device resolution
//!
//! [`Resolver`] answers from the cache when an entry is fresh and already holds
//! every requested capability. Anything else (no entry, a stale entry, or a
//! missing capability) goes to the remote service for the full requested set,
//! and the answer is written back to the cache.

mod stats;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStore, LookupKey, open_cache};
use crate::client::{CloudClient, RemoteLookup};
use crate::config::Config;
use crate::error::{LookupFailure, Result};
use crate::models::{DeviceRecord, Headers, RequestSignal};

use stats::{Event, StatsCounters};
pub use stats::ResolverStats;

/// Default staleness threshold
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Resolves request signals to device records.
///
/// Performs at most one cache read, one cache write and one remote call per
/// lookup. Cache failures are treated as misses; remote failures are returned
/// to the caller and never answered from a stale entry.
pub struct Resolver<C: RemoteLookup> {
    client: C,
    cache: Arc<dyn CacheStore>,
    max_age: Duration,
    default_capabilities: Vec<String>,
    stats: StatsCounters,
}

impl Resolver<CloudClient> {
    /// Build a resolver with the WURFL Cloud client and the configured cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let client = CloudClient::new(config).map_err(LookupFailure::from)?;
        let cache = open_cache(&config.cache)?;

        Ok(Resolver::new(client, cache)
            .with_max_age(config.cache.max_age())
            .with_default_capabilities(config.capabilities.clone()))
    }
}

impl<C: RemoteLookup> Resolver<C> {
    pub fn new(client: C, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            client,
            cache,
            max_age: DEFAULT_MAX_AGE,
            default_capabilities: Vec::new(),
            stats: StatsCounters::default(),
        }
    }

    /// Entries older than `max_age` are refetched
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Capabilities to request when a lookup names none
    pub fn with_default_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.default_capabilities = capabilities;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats.snapshot()
    }

    /// Resolve a user agent and/or request headers.
    ///
    /// The user agent is used when present, otherwise the headers. An empty
    /// `capabilities` slice requests the configured default set.
    pub async fn resolve(
        &self,
        user_agent: Option<&str>,
        headers: Option<&Headers>,
        capabilities: &[String],
    ) -> std::result::Result<DeviceRecord, LookupFailure> {
        let signal = RequestSignal::new(user_agent, headers);
        self.resolve_signal(&signal, capabilities).await
    }

    pub async fn resolve_signal(
        &self,
        signal: &RequestSignal,
        capabilities: &[String],
    ) -> std::result::Result<DeviceRecord, LookupFailure> {
        let key = LookupKey::derive(signal)?;
        let requested = if capabilities.is_empty() {
            self.default_capabilities.as_slice()
        } else {
            capabilities
        };
        let capabilities = unique_capabilities(requested);
        let capabilities = capabilities.as_slice();

        match self.cached(&key) {
            Some(entry) if entry.is_stale(self.max_age) => {
                log::debug!("Cache stale: {} (age {:?})", key, entry.age());
                self.stats.record(Event::Stale);
            }
            Some(entry) if entry.record.has_capabilities(capabilities) => {
                log::debug!("Cache hit: {} -> {}", key, entry.record.id);
                self.stats.record(Event::Hit);
                return Ok(entry.record);
            }
            Some(entry) => {
                log::debug!(
                    "Cache partial: {} missing {:?}",
                    key,
                    entry.record.missing_capabilities(capabilities)
                );
                self.stats.record(Event::Partial);
            }
            None => {
                log::debug!("Cache miss: {}", key);
                self.stats.record(Event::Miss);
            }
        }

        self.stats.record(Event::RemoteFetch);
        let record = self.client.fetch(signal, capabilities).await?;

        if let Err(e) = self.cache.put(&key, &record) {
            log::warn!("Failed to cache device {}: {}", record.id, e);
            self.stats.record(Event::CacheError);
        }

        Ok(record)
    }

    fn cached(&self, key: &LookupKey) -> Option<CacheEntry> {
        match self.cache.get(key) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Cache read failed, treating as miss: {}", e);
                self.stats.record(Event::CacheError);
                None
            }
        }
    }
}

/// Drop repeated names, keeping the first occurrence of each
fn unique_capabilities(capabilities: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    capabilities
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}
