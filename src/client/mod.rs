//! WURFL Cloud remote lookup client

use async_trait::async_trait;

use crate::error::RemoteFailure;
use crate::models::{DeviceRecord, RequestSignal};

pub mod cloud;
#[cfg(test)]
pub mod mock;

pub use cloud::CloudClient;
#[cfg(test)]
pub use mock::MockRemoteClient;

/// A source of authoritative device records.
#[async_trait]
pub trait RemoteLookup: Send + Sync {
    /// Resolve the signal remotely, asking for `capabilities` (all defaults when empty).
    async fn fetch(
        &self,
        signal: &RequestSignal,
        capabilities: &[String],
    ) -> Result<DeviceRecord, RemoteFailure>;
}

/// Path for a lookup: the base path alone, or with a `search:(a,b)` segment.
///
/// Capability order is preserved.
pub fn lookup_path<S: AsRef<str>>(base_path: &str, capabilities: &[S]) -> String {
    if capabilities.is_empty() {
        return base_path.to_string();
    }

    let names: Vec<&str> = capabilities.iter().map(AsRef::as_ref).collect();
    format!("{}search:({})", base_path, names.join(","))
}
