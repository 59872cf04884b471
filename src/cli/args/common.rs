//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized capability listing (default)
    #[default]
    Pretty,
    /// JSON format - structured for scripts/APIs
    Json,
}
