//! Configuration commands

use std::path::PathBuf;

use anyhow::{Context, bail};
use colored::Colorize;

use crate::cli::context::load_config;
use crate::cli::{GlobalOptions, OutputFormat};
use wurfl_cloud::Config;

/// Print the effective configuration with the API key masked
pub fn show(opts: &GlobalOptions) -> anyhow::Result<()> {
    let config = load_config(opts)?;
    let path = match opts.config_ref() {
        Some(p) => p.to_string(),
        None => Config::default_path()?.display().to_string(),
    };

    match opts.format {
        OutputFormat::Json => {
            let masked = Config {
                api_key: config.masked_api_key(),
                ..config
            };
            println!("{}", serde_json::to_string_pretty(&masked)?);
        }
        OutputFormat::Pretty => {
            println!("Config file:    {}", path.cyan());
            match config.masked_api_key() {
                Some(key) => println!("API key:        {}", key),
                None => println!("API key:        {}", "not configured".yellow()),
            }
            println!("Endpoint:       {}{}", config.api_host, config.base_path);
            println!("Client header:  {}", config.client_header());
            println!("Timeout:        {}s", config.timeout_secs);
            if config.capabilities.is_empty() {
                println!("Capabilities:   {}", "(account default)".dimmed());
            } else {
                println!("Capabilities:   {}", config.capabilities.join(", "));
            }
            println!(
                "Cache:          {:?}, max age {}s",
                config.cache.backend, config.cache.max_age_secs
            );
        }
    }

    Ok(())
}

/// Write a default config file, with `--api-key`/`--api-host` applied
pub fn init(opts: &GlobalOptions, force: bool) -> anyhow::Result<()> {
    let path = match opts.config_ref() {
        Some(p) => PathBuf::from(p),
        None => Config::default_path()?,
    };
    if path.exists() && !force {
        bail!(
            "Config file {} already exists (use --force to replace it)",
            path.display()
        );
    }

    let config = initial_config(opts);
    config.validate()?;
    config
        .save_to(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Wrote {}", "✓".green(), path.display());
    if config.api_key.is_none() {
        println!(
            "{}",
            "No API key set; add api_key or pass --api-key on each run".yellow()
        );
    }
    Ok(())
}

fn initial_config(opts: &GlobalOptions) -> Config {
    let mut config = Config::default();
    if let Some(ref key) = opts.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(ref host) = opts.api_host {
        config.api_host = host.clone();
    }
    config
}
