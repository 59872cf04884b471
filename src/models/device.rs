//! Resolved device record

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Capability name to capability value
pub type Capabilities = BTreeMap<String, Value>;

/// Capability name to the error the service reported for it
pub type CapabilityErrors = BTreeMap<String, String>;

/// Device description returned by WURFL Cloud (or reconstructed from cache).
///
/// A capability is either resolved (in `capabilities`) or failed (in `errors`),
/// never both. Records deserialized from the wire are normalized so that any
/// key reported in `errors` is dropped from `capabilities`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireDeviceRecord")]
pub struct DeviceRecord {
    /// Matched WURFL device id
    pub id: String,

    /// Data/schema version that produced this record
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Upstream data modification time (Unix seconds)
    pub mtime: i64,

    pub capabilities: Capabilities,

    pub errors: CapabilityErrors,
}

/// Wire shape of a lookup response. Every field is required.
#[derive(Deserialize)]
struct WireDeviceRecord {
    id: String,
    #[serde(rename = "apiVersion")]
    api_version: String,
    mtime: i64,
    capabilities: Capabilities,
    errors: CapabilityErrors,
}

impl From<WireDeviceRecord> for DeviceRecord {
    fn from(wire: WireDeviceRecord) -> Self {
        DeviceRecord::new(
            wire.id,
            wire.api_version,
            wire.mtime,
            wire.capabilities,
            wire.errors,
        )
    }
}

impl DeviceRecord {
    pub fn new(
        id: impl Into<String>,
        api_version: impl Into<String>,
        mtime: i64,
        mut capabilities: Capabilities,
        errors: CapabilityErrors,
    ) -> Self {
        for name in errors.keys() {
            if capabilities.remove(name).is_some() {
                log::debug!("Dropping capability '{}' reported as an error", name);
            }
        }

        Self {
            id: id.into(),
            api_version: api_version.into(),
            mtime,
            capabilities,
            errors,
        }
    }

    /// Raw value of a resolved capability
    pub fn capability(&self, name: &str) -> Option<&Value> {
        self.capabilities.get(name)
    }

    /// Capability as a boolean; accepts JSON booleans and "true"/"false" strings
    pub fn capability_bool(&self, name: &str) -> Option<bool> {
        match self.capability(name)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// True when every requested name is a resolved capability of this record.
    ///
    /// Names listed in `errors` do not count as resolved.
    pub fn has_capabilities<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names
            .iter()
            .all(|name| self.capabilities.contains_key(name.as_ref()))
    }

    /// Requested names this record has not resolved
    pub fn missing_capabilities<'a, S: AsRef<str>>(&self, names: &'a [S]) -> Vec<&'a str> {
        names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !self.capabilities.contains_key(*name))
            .collect()
    }
}
