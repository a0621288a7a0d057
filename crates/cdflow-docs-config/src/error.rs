//! Errors raised while loading or building a descriptor.

use std::path::PathBuf;

use crate::loader::Format;
use crate::validate::Violation;

/// Errors that can occur when working with a descriptor.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} descriptor: {message}")]
    Parse { format: Format, message: String },

    #[error("Unsupported descriptor format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid descriptor: {}", join_violations(.0))]
    Invalid(Vec<Violation>),

    #[error("Failed to serialize descriptor: {0}")]
    Serialize(String),
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
