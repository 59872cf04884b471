//! Configuration management for the WURFL Cloud client

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Public WURFL Cloud endpoint
pub const DEFAULT_API_HOST: &str = "http://api.wurflcloud.com";

/// JSON lookup endpoint path
pub const DEFAULT_BASE_PATH: &str = "/v1/json/";

/// Client name sent in the `X-Cloud-Client` header
pub const DEFAULT_CLIENT_NAME: &str = "WurflCloud_Client";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// WURFL Cloud API key (`<user>:<secret>`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API scheme and host, without path
    #[serde(default = "default_api_host")]
    pub api_host: String,

    /// Lookup endpoint path; capability searches are appended to it
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// HTTP timeout for a single lookup
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_client_name")]
    pub client_name: String,

    #[serde(default = "default_client_version")]
    pub client_version: String,

    /// Capabilities requested when the caller asks for none.
    /// Empty means the account's default capability set.
    #[serde(default)]
    pub capabilities: Vec<String>,

    #[serde(default)]
    pub cache: CacheConfig,
}

/// Which cache backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Null,
    Memory,
    Sqlite,
}

/// Cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_backend")]
    pub backend: CacheBackend,

    /// Entries older than this are refetched
    #[serde(default = "default_max_age_secs")]
    pub max_age_secs: u64,

    /// Entry limit for the memory backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,

    /// Directory for the SQLite backend (defaults to the XDG cache dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_client_name() -> String {
    DEFAULT_CLIENT_NAME.to_string()
}

fn default_client_version() -> String {
    format!("Rust_{}", env!("CARGO_PKG_VERSION"))
}

fn default_backend() -> CacheBackend {
    CacheBackend::Sqlite
}

fn default_max_age_secs() -> u64 {
    24 * 60 * 60 // 1 day
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            max_age_secs: default_max_age_secs(),
            max_entries: None,
            path: None,
        }
    }
}

impl CacheConfig {
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_host: default_api_host(),
            base_path: default_base_path(),
            timeout_secs: default_timeout_secs(),
            client_name: default_client_name(),
            client_version: default_client_version(),
            capabilities: Vec::new(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".wurfl-cloud").join("config.yaml"))
    }

    /// Load from an explicit path, or from the default path when given none.
    ///
    /// A missing default file yields the default configuration; a missing
    /// explicit file is an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(Path::new(p)),
            None => {
                let default = Self::default_path()?;
                if default.exists() {
                    Self::load_from(&default)
                } else {
                    log::debug!("No config at {}, using defaults", default.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        std::fs::write(path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Check that the endpoint settings can form a request URL
    pub fn validate(&self) -> Result<()> {
        if !(self.api_host.starts_with("http://") || self.api_host.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "api_host must start with http:// or https://, got '{}'",
                self.api_host
            ))
            .into());
        }
        if !self.base_path.starts_with('/') || !self.base_path.ends_with('/') {
            return Err(ConfigError::Invalid(format!(
                "base_path must start and end with '/', got '{}'",
                self.base_path
            ))
            .into());
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".to_string()).into());
        }
        Ok(())
    }

    /// Value of the `X-Cloud-Client` header
    pub fn client_header(&self) -> String {
        format!("{}/{}", self.client_name, self.client_version)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API key with the secret part masked, for display
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| match key.split_once(':') {
            Some((user, _)) => format!("{}:********", user),
            None => "********".to_string(),
        })
    }
}
