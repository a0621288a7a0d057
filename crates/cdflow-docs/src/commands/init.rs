//! Write the cdflow2 descriptor and optional stub pages.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cdflow_docs_config::{serialize, Format, MenuEntry, SiteConfig};
use serde::Serialize;

use super::src_dir;

const HEADER: &str = "# cdflow2 documentation descriptor\n\n";

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool, pages: bool) -> Result<()> {
    tracing::info!("Initializing {}...", config_path.display());

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    let config = SiteConfig::cdflow2();
    let format = Format::from_path(config_path)?;

    let mut content = serialize(&config, format)?;
    if format == Format::Toml {
        content.insert_str(0, HEADER);
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("Failed to create descriptor directory")?;
        }
    }
    fs::write(config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    if pages {
        let created = write_stub_pages(&src_dir(config_path, &config), &config, yes)?;
        tracing::info!("Created {} pages", created);
    }

    tracing::info!("Initialization complete!");

    Ok(())
}

/// Create one page per menu label, grouped pages in a directory per group.
fn write_stub_pages(src: &Path, config: &SiteConfig, overwrite: bool) -> Result<usize> {
    fs::create_dir_all(src).context("Failed to create source directory")?;

    let mut created = 0;

    for (index, entry) in config.menu().iter().enumerate() {
        match entry {
            MenuEntry::Page(label) => {
                let (file, route) = if index == 0 {
                    ("index".to_string(), "/".to_string())
                } else {
                    let slug = slugify(label);
                    (slug.clone(), format!("/{slug}"))
                };
                let path = src.join(format!("{file}.mdx"));
                created += write_stub(&path, label, None, &route, overwrite)?;
            }
            MenuEntry::Group(group) => {
                let dir = slugify(&group.name);
                fs::create_dir_all(src.join(&dir))
                    .with_context(|| format!("Failed to create {dir} directory"))?;

                for label in &group.menu {
                    let slug = slugify(label);
                    let path = src.join(&dir).join(format!("{slug}.mdx"));
                    let route = format!("/{dir}/{slug}");
                    created += write_stub(&path, label, Some(&group.name), &route, overwrite)?;
                }
            }
        }
    }

    Ok(created)
}

fn write_stub(
    path: &Path,
    label: &str,
    group: Option<&str>,
    route: &str,
    overwrite: bool,
) -> Result<usize> {
    if path.exists() && !overwrite {
        tracing::debug!("Keeping existing {}", path.display());
        return Ok(0);
    }

    let page = render_stub(label, group, route)?;

    fs::write(path, page).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Created {}", path.display());

    Ok(1)
}

/// Frontmatter written at the top of a stub page.
#[derive(Debug, Serialize)]
struct StubFrontmatter<'a> {
    name: &'a str,
    route: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    menu: Option<&'a str>,
}

fn render_stub(label: &str, group: Option<&str>, route: &str) -> Result<String> {
    let frontmatter = serde_yaml::to_string(&StubFrontmatter {
        name: label,
        route,
        menu: group,
    })
    .context("Failed to serialize page frontmatter")?;

    Ok(format!("---\n{frontmatter}---\n\n# {label}\n"))
}

/// Convert a label to a file-name-safe slug.
fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' || c == '.' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
