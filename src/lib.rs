//! WURFL Cloud client
//!
//! Resolves a request's user agent or headers to a [`DeviceRecord`], answering
//! from a local cache when it can and from the WURFL Cloud API when it must.
//!
//! ```no_run
//! # async fn demo() -> wurfl_cloud::Result<()> {
//! use wurfl_cloud::{Config, Resolver};
//!
//! let resolver = Resolver::from_config(&Config::load_at(None)?)?;
//! let device = resolver
//!     .resolve(Some("Mozilla/5.0 (iPhone; CPU iPhone OS 8_4_1 like Mac OS X)"), None, &[])
//!     .await?;
//! println!("{} wireless={:?}", device.id, device.capability_bool("is_wireless_device"));
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;

pub use cache::{CacheEntry, CacheStore, LookupKey, MemoryCache, NullCache, SqliteCache};
pub use client::{CloudClient, RemoteLookup};
pub use config::{CacheBackend, CacheConfig, Config};
pub use error::{Error, FailureKind, LookupFailure, RemoteFailure, Result};
pub use models::{DeviceRecord, Headers, RequestSignal};
pub use resolver::{Resolver, ResolverStats};
