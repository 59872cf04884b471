//! Capability and header argument types

use clap::Args;

/// Capabilities to request, shared by lookup commands.
///
/// ```ignore
/// Lookup {
///     #[command(flatten)]
///     capabilities: CapabilityArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct CapabilityArgs {
    /// Capability to request (repeatable or comma-separated; config default when omitted)
    #[arg(long = "capability", short = 'c', value_delimiter = ',')]
    pub capabilities: Vec<String>,
}

impl CapabilityArgs {
    /// Requested names with blanks removed, in the order given
    pub fn names(&self) -> Vec<String> {
        self.capabilities
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Parse `NAME=VALUE` or `NAME: VALUE` into a header pair
pub fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = match (raw.find('='), raw.find(':')) {
        (Some(eq), Some(colon)) if colon < eq => raw.split_at(colon),
        (Some(eq), _) => raw.split_at(eq),
        (None, Some(colon)) => raw.split_at(colon),
        (None, None) => return Err(format!("expected NAME=VALUE or 'NAME: VALUE', got '{}'", raw)),
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing header name in '{}'", raw));
    }

    Ok((name.to_string(), value[1..].trim().to_string()))
}
