//! Cache management commands

use std::path::PathBuf;

use crate::cli::context::load_config;
use crate::cli::{GlobalOptions, OutputFormat};
use wurfl_cloud::SqliteCache;

/// Directory of the persistent cache, honoring the config override
fn cache_dir(opts: &GlobalOptions) -> anyhow::Result<PathBuf> {
    let config = load_config(opts)?;
    match config.cache.path {
        Some(path) => Ok(path),
        None => Ok(SqliteCache::cache_dir()?),
    }
}

fn open(opts: &GlobalOptions) -> anyhow::Result<(SqliteCache, PathBuf)> {
    let dir = cache_dir(opts)?;
    let cache = SqliteCache::open_at(&dir)?;
    Ok((cache, dir))
}

/// Show cache status/statistics
pub fn status(opts: &GlobalOptions) -> anyhow::Result<()> {
    let (cache, dir) = open(opts)?;
    let stats = cache.stats()?;

    match opts.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "total_entries": stats.total_entries,
                "total_size_bytes": stats.total_size_bytes,
                "total_size_human": format_size(stats.total_size_bytes),
                "oldest_entry_timestamp": stats.oldest_entry,
                "newest_entry_timestamp": stats.newest_entry,
                "path": dir.display().to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Pretty => {
            println!("Cache Status");
            println!("────────────────────────────────────────");
            println!("Location:       {}", dir.display());
            println!("Devices:        {}", stats.total_entries);
            println!("Total size:     {}", format_size(stats.total_size_bytes));

            if let Some(oldest) = stats.oldest_entry {
                println!("Oldest entry:   {}", format_timestamp(oldest));
            }
            if let Some(newest) = stats.newest_entry {
                println!("Newest entry:   {}", format_timestamp(newest));
            }
        }
    }

    Ok(())
}

/// Clear all cache entries
pub fn clear(opts: &GlobalOptions) -> anyhow::Result<()> {
    let (cache, _) = open(opts)?;
    let stats = cache.clear_all()?;

    match opts.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Pretty => {
            if stats.entries_removed > 0 {
                println!("Cleared {} cached devices", stats.entries_removed);
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}

/// Show cache path
pub fn path(opts: &GlobalOptions) -> anyhow::Result<()> {
    println!("{}", cache_dir(opts)?.display());
    Ok(())
}

fn format_timestamp(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|d| {
            d.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Format bytes as human-readable size
fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
