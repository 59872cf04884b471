//! Shared CLI argument types
//!
//! This module contains reusable argument structs that can be flattened
//! into commands using `#[command(flatten)]`.

mod capability;
mod common;
mod global;

pub use capability::{CapabilityArgs, parse_header};
pub use common::OutputFormat;
pub use global::GlobalOptions;
