//! Command execution context
//!
//! Loads configuration, applies CLI overrides and builds the resolver so that
//! individual commands don't repeat that setup.

use anyhow::Context;

use crate::cli::{GlobalOptions, OutputFormat};
use wurfl_cloud::{CacheBackend, CloudClient, Config, Resolver};

/// Context for command execution: the resolver plus runtime options.
pub struct CommandContext {
    pub resolver: Resolver<CloudClient>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config and build a resolver for it.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded, is invalid, or the cache
    /// cannot be opened.
    pub fn new(opts: &GlobalOptions) -> anyhow::Result<Self> {
        let config = load_config(opts)?;
        let resolver = Resolver::from_config(&config).context("Failed to set up resolver")?;

        Ok(Self {
            resolver,
            format: opts.format,
        })
    }
}

/// Load the config file and apply CLI/env overrides on top.
pub fn load_config(opts: &GlobalOptions) -> anyhow::Result<Config> {
    let mut config = Config::load_at(opts.config_ref()).context("Failed to load configuration")?;

    if let Some(ref key) = opts.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(ref host) = opts.api_host {
        config.api_host = host.clone();
    }
    if opts.no_cache {
        config.cache.backend = CacheBackend::Null;
    }

    config.validate()?;
    Ok(config)
}
