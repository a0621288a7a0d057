//! Validate a descriptor and resolve its menu.

use std::path::Path;

use anyhow::{Context, Result};
use cdflow_docs_config::load_or_default;
use cdflow_docs_pages::{discover_pages, resolve};

use super::src_dir;

/// Run the check command.
///
/// Every issue is logged before failing, so one run shows all of them.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_or_default(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let src = src_dir(config_path, &config);
    let pages = discover_pages(&src)?;
    let resolution = resolve(&config, &pages);

    for issue in &resolution.issues {
        tracing::warn!("{}", issue);
    }

    if !resolution.is_clean() {
        anyhow::bail!(
            "{} navigation issues in {}",
            resolution.issues.len(),
            src.display()
        );
    }

    tracing::info!(
        "{} menu labels resolved against {} pages in {}",
        config.labels().len(),
        pages.len(),
        src.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn descriptor(src: &str) -> String {
        format!(
            r#"title = "Docs"
description = "Test docs"
base = "/docs"
menu = ["Overview", {{ name = "Commands", menu = ["Deploy"] }}]
host = "127.0.0.1"
src = "{src}"
"#
        )
    }

    #[tokio::test]
    async fn passes_when_every_label_resolves() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("doczrc.toml");
        fs::write(&config_path, descriptor("./pages")).unwrap();

        let pages = temp.path().join("pages");
        fs::create_dir_all(&pages).unwrap();
        fs::write(pages.join("index.mdx"), "---\nname: Overview\n---\n").unwrap();
        fs::write(
            pages.join("deploy.mdx"),
            "---\nname: Deploy\nmenu: Commands\n---\n",
        )
        .unwrap();

        run(&config_path).await.unwrap();
    }

    #[tokio::test]
    async fn fails_on_missing_pages() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("doczrc.toml");
        fs::write(&config_path, descriptor("./pages")).unwrap();

        let pages = temp.path().join("pages");
        fs::create_dir_all(&pages).unwrap();
        fs::write(pages.join("index.mdx"), "# Overview\n").unwrap();

        let err = run(&config_path).await.unwrap_err();
        assert!(err.to_string().contains("1 navigation issues"));
    }

    #[tokio::test]
    async fn fails_on_invalid_descriptor() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("doczrc.toml");
        fs::write(&config_path, descriptor("")).unwrap();

        assert!(run(&config_path).await.is_err());
    }

    #[tokio::test]
    async fn fails_when_src_is_missing() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("doczrc.toml");
        fs::write(&config_path, descriptor("./missing")).unwrap();

        let err = run(&config_path).await.unwrap_err();
        assert!(err.to_string().contains("Source directory not found"));
    }
}
