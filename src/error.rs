//! Error types for the WURFL Cloud client

use thiserror::Error;

/// Result type alias for client operations that are not lookups
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the library and CLI
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lookup(#[from] LookupFailure),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a failed lookup.
///
/// Lets callers branch on the kind without matching on payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidInput,
    RemoteUnavailable,
    RemoteRejected,
    MalformedResponse,
}

/// Failure returned by `Resolver::resolve`.
#[derive(Debug, Error)]
pub enum LookupFailure {
    #[error("Invalid lookup input: {0}")]
    InvalidInput(String),

    #[error("WURFL Cloud unreachable: {0}")]
    RemoteUnavailable(String),

    #[error("WURFL Cloud rejected the lookup with status {status}: {body}")]
    RemoteRejected { status: u16, body: String },

    #[error("Malformed WURFL Cloud response: {0}")]
    MalformedResponse(String),
}

impl LookupFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            LookupFailure::InvalidInput(_) => FailureKind::InvalidInput,
            LookupFailure::RemoteUnavailable(_) => FailureKind::RemoteUnavailable,
            LookupFailure::RemoteRejected { .. } => FailureKind::RemoteRejected,
            LookupFailure::MalformedResponse(_) => FailureKind::MalformedResponse,
        }
    }

    /// Only transport failures are worth retrying; everything else will fail the same way.
    pub fn is_retryable(&self) -> bool {
        self.kind() == FailureKind::RemoteUnavailable
    }
}

/// Failure raised by a remote lookup client
#[derive(Debug, Error)]
pub enum RemoteFailure {
    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Unexpected status code {status}: {body}")]
    NonOkStatus { status: u16, body: String },

    #[error("Invalid API response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for RemoteFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteFailure::TransportError("Request timed out".to_string())
        } else if err.is_connect() {
            RemoteFailure::TransportError("Failed to connect to API".to_string())
        } else if err.is_decode() {
            RemoteFailure::MalformedResponse(err.to_string())
        } else {
            RemoteFailure::TransportError(err.to_string())
        }
    }
}

impl From<RemoteFailure> for LookupFailure {
    fn from(err: RemoteFailure) -> Self {
        match err {
            RemoteFailure::TransportError(msg) => LookupFailure::RemoteUnavailable(msg),
            RemoteFailure::NonOkStatus { status, body } => {
                LookupFailure::RemoteRejected { status, body }
            }
            RemoteFailure::MalformedResponse(msg) => LookupFailure::MalformedResponse(msg),
        }
    }
}

/// Cache storage errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Could not determine cache directory")]
    NoHome,

    #[error("Cache I/O error: {0}")]
    Io(String),

    #[error("Cache database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache lock poisoned")]
    Poisoned,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
