//! Print the descriptor.

use std::path::Path;

use anyhow::{Context, Result};
use cdflow_docs_config::{load_or_default, serialize, Format};
use clap::ValueEnum;

/// Output format accepted by `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Toml,
    Yaml,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Toml => Format::Toml,
            OutputFormat::Yaml => Format::Yaml,
            OutputFormat::Json => Format::Json,
        }
    }
}

/// Run the show command, returning the serialized descriptor.
pub async fn run(config_path: &Path, format: OutputFormat) -> Result<String> {
    let config = load_or_default(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let mut output = serialize(&config, format.into())?;
    if !output.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}
