//! Batch lookup command
//!
//! Resolves many user agents concurrently; results are printed in input order.

use std::io::Read;

use anyhow::Context;
use colored::Colorize;
use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::cli::{BatchArgs, CommandContext, GlobalOptions, OutputFormat};
use crate::output::json::format_json_line;
use wurfl_cloud::{DeviceRecord, LookupFailure};

/// One line of batch output
#[derive(Debug, Serialize)]
struct BatchLine<'a> {
    user_agent: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<&'a DeviceRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Resolve every non-blank line of the input
pub async fn run(args: BatchArgs, opts: &GlobalOptions) -> anyhow::Result<()> {
    let ctx = CommandContext::new(opts)?;
    let input = read_input(&args)?;
    let user_agents = user_agents(&input);
    let capabilities = args.capabilities.names();
    let concurrency = args.concurrency.max(1);

    log::debug!(
        "Resolving {} user agents with max {} concurrent",
        user_agents.len(),
        concurrency
    );

    let results: Vec<Result<DeviceRecord, LookupFailure>> = stream::iter(user_agents.iter())
        .map(|ua| ctx.resolver.resolve(Some(*ua), None, &capabilities))
        .buffered(concurrency)
        .collect()
        .await;

    let mut failed = 0;
    for (ua, result) in user_agents.iter().zip(&results) {
        if result.is_err() {
            failed += 1;
        }
        println!("{}", format_line(ua, result, ctx.format)?);
    }

    let stats = ctx.resolver.stats();
    eprintln!(
        "{}",
        format!(
            "Resolved {}/{} (cache hits {}, remote fetches {})",
            results.len() - failed,
            results.len(),
            stats.hits,
            stats.remote_fetches
        )
        .dimmed()
    );

    if failed > 0 {
        anyhow::bail!("{} of {} lookups failed", failed, results.len());
    }
    Ok(())
}

fn read_input(args: &BatchArgs) -> anyhow::Result<String> {
    let mut input = String::new();
    match args.file {
        Some(ref path) => {
            input = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
        None => {
            std::io::stdin().read_to_string(&mut input)?;
        }
    }
    Ok(input)
}

/// Non-blank, trimmed lines
fn user_agents(input: &str) -> Vec<&str> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn format_line(
    ua: &str,
    result: &Result<DeviceRecord, LookupFailure>,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let line = BatchLine {
                user_agent: ua,
                device: result.as_ref().ok(),
                error: result.as_ref().err().map(ToString::to_string),
            };
            Ok(format_json_line(&line)?)
        }
        OutputFormat::Pretty => Ok(match result {
            Ok(record) => format!("{}\t{}", record.id.cyan(), ua),
            Err(e) => format!("{}\t{} ({})", "error".red(), ua, e),
        }),
    }
}
