//! Human-readable device output

use colored::Colorize;
use serde_json::Value;

use super::Formattable;
use super::json::format_json;
use crate::cli::OutputFormat;
use wurfl_cloud::{DeviceRecord, Result};

impl Formattable for DeviceRecord {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_json(self)?),
            OutputFormat::Pretty => Ok(format_device(self)),
        }
    }
}

/// Render a device record as an aligned capability listing
pub fn format_device(record: &DeviceRecord) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "Device:".bold(), record.id.cyan()));
    out.push_str(&format!(
        "{}\n",
        format!("{} (mtime {})", record.api_version, record.mtime).dimmed()
    ));

    let width = record
        .capabilities
        .keys()
        .chain(record.errors.keys())
        .map(String::len)
        .max()
        .unwrap_or(0);

    if !record.capabilities.is_empty() {
        out.push('\n');
    }
    for (name, value) in &record.capabilities {
        out.push_str(&format!("  {:<width$}  {}\n", name, format_value(value)));
    }

    for (name, error) in &record.errors {
        out.push_str(&format!("  {:<width$}  {} {}\n", name, "✗".red(), error));
    }

    out.trim_end().to_string()
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Bool(true) => "true".green().to_string(),
        Value::Bool(false) => "false".yellow().to_string(),
        Value::String(s) => s.clone(),
        Value::Null => "-".dimmed().to_string(),
        other => other.to_string(),
    }
}
