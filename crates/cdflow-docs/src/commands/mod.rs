//! CLI subcommands.

use std::path::{Path, PathBuf};

use cdflow_docs_config::SiteConfig;

pub mod check;
pub mod diff;
pub mod init;
pub mod nav;
pub mod show;

/// Source directory of `config`, relative to the directory holding the descriptor.
pub(crate) fn src_dir(config_path: &Path, config: &SiteConfig) -> PathBuf {
    config_path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(config.src())
}
