//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod args;
pub mod batch;
pub mod cache;
pub mod config;
pub mod context;
pub mod lookup;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// WURFL Cloud client - resolve user agents to device capabilities
#[derive(Parser, Debug)]
#[command(name = "wurfl-cloud")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, json)
    #[arg(
        long,
        global = true,
        env = "WURFL_CLOUD_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "WURFL_CLOUD_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// API key (`<user>:<secret>`), overrides the config file
    #[arg(
        long,
        global = true,
        env = "WURFL_CLOUD_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// API host, overrides the config file
    #[arg(long, global = true, env = "WURFL_CLOUD_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "WURFL_CLOUD_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass the cache and always ask WURFL Cloud
    #[arg(long, global = true, env = "WURFL_CLOUD_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve one user agent or set of request headers
    Lookup(LookupArgs),

    /// Resolve one user agent per line from a file or stdin
    Batch(BatchArgs),

    /// Manage the local device cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Inspect or create configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Arguments for a single lookup
#[derive(Args, Debug, Clone, Default)]
pub struct LookupArgs {
    /// User agent to resolve
    #[arg(long, short = 'u')]
    pub user_agent: Option<String>,

    /// Request header as NAME=VALUE or "NAME: VALUE" (repeatable)
    #[arg(long = "header", short = 'H', value_parser = args::parse_header)]
    pub headers: Vec<(String, String)>,

    #[command(flatten)]
    pub capabilities: args::CapabilityArgs,
}

/// Arguments for batch lookups
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// File with one user agent per line (stdin when omitted)
    pub file: Option<PathBuf>,

    /// Maximum lookups in flight at once
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,

    #[command(flatten)]
    pub capabilities: args::CapabilityArgs,
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,

    /// Remove all cached devices
    Clear,

    /// Print the cache directory
    Path,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration (API key masked)
    Show,

    /// Write a new config file from defaults and the global overrides
    Init {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}
