//! Print the resolved navigation.

use std::path::Path;

use anyhow::{Context, Result};
use cdflow_docs_config::load_or_default;
use cdflow_docs_pages::{discover_pages, resolve, NavItem};
use serde::Serialize;

use super::src_dir;

/// Navigation document printed by `nav`.
#[derive(Debug, Serialize)]
struct NavOutput<'a> {
    title: &'a str,
    base: &'a str,
    menu: Vec<NavItem>,
}

/// Run the nav command, returning the navigation as pretty JSON.
///
/// Unresolved labels are kept with a null path and logged.
pub async fn run(config_path: &Path) -> Result<String> {
    let config = load_or_default(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let pages = discover_pages(&src_dir(config_path, &config))?;
    let resolution = resolve(&config, &pages);

    for issue in &resolution.issues {
        tracing::warn!("{}", issue);
    }

    let output = NavOutput {
        title: config.title(),
        base: config.base(),
        menu: resolution.navigation,
    };

    serde_json::to_string_pretty(&output).context("Failed to serialize navigation")
}
