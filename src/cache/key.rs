//! Lookup key derivation using SHA-256 hashes

use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::LookupFailure;
use crate::models::RequestSignal;

/// Cache key for a resolved device, derived from the request signal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey(String);

impl LookupKey {
    /// Derive a key from the explicit user agent, or from the headers when there is none.
    ///
    /// Header keys are order-independent and header names are compared
    /// case-insensitively.
    pub fn derive(signal: &RequestSignal) -> Result<Self, LookupFailure> {
        if signal.is_empty() {
            return Err(LookupFailure::InvalidInput(
                "user agent and headers are both empty".to_string(),
            ));
        }

        let mut hasher = Sha256::new();

        if let Some(ua) = signal.explicit_user_agent() {
            hasher.update(b"ua|");
            hasher.update(ua.as_bytes());
        } else {
            hasher.update(b"headers|");

            // Sort for deterministic key
            let mut sorted: Vec<(String, &str)> = signal
                .headers()
                .iter()
                .filter(|(_, v)| !v.trim().is_empty())
                .map(|(k, v)| (k.to_ascii_lowercase(), v.as_str()))
                .collect();
            sorted.sort();

            // Each name and value is length-prefixed
            for (k, v) in sorted {
                hasher.update((k.len() as u64).to_le_bytes());
                hasher.update(k.as_bytes());
                hasher.update((v.len() as u64).to_le_bytes());
                hasher.update(v.as_bytes());
            }
        }

        Ok(Self(format!("{:x}", hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
