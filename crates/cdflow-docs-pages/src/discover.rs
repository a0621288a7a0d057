//! Discovering source pages under the descriptor's `src` directory.

use std::fs;
use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::frontmatter::{extract_frontmatter, FrontmatterError};

/// A documentation source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcePage {
    /// Path relative to the source directory
    pub path: PathBuf,

    /// Label the page answers to in the menu
    pub label: String,

    /// Explicit route from frontmatter
    pub route: Option<String>,

    /// Group declared in frontmatter
    pub group: Option<String>,
}

/// Errors that can occur while discovering pages.
#[derive(Debug, thiserror::Error)]
pub enum PagesError {
    #[error("Source directory not found: {}", .0.display())]
    SrcNotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Frontmatter error in {}: {source}", .path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
}

/// Find every `.mdx` and `.md` page under `src_dir`.
///
/// Pages are returned in file-name order.
pub fn discover_pages(src_dir: &Path) -> Result<Vec<SourcePage>, PagesError> {
    if !src_dir.is_dir() {
        return Err(PagesError::SrcNotFound(src_dir.to_path_buf()));
    }

    let paths: Vec<PathBuf> = WalkDir::new(src_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", src_dir.display(), e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| is_page(path))
        .collect();

    let pages = paths
        .par_iter()
        .map(|path| read_page(src_dir, path))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Discovered {} pages in {}", pages.len(), src_dir.display());

    Ok(pages)
}

fn is_page(path: &Path) -> bool {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    ext == "mdx" || ext == "md"
}

fn read_page(src_dir: &Path, path: &Path) -> Result<SourcePage, PagesError> {
    let source = fs::read_to_string(path).map_err(|source| PagesError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (frontmatter, content) =
        extract_frontmatter(&source).map_err(|source| PagesError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?;
    let frontmatter = frontmatter.unwrap_or_default();

    let relative = path.strip_prefix(src_dir).unwrap_or(path).to_path_buf();

    let label = frontmatter
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .or_else(|| first_heading(content))
        .unwrap_or_else(|| label_from_stem(&relative));

    Ok(SourcePage {
        path: relative,
        label,
        route: frontmatter.route,
        group: frontmatter.menu,
    })
}

/// Text of the first level-one heading.
fn first_heading(content: &str) -> Option<String> {
    let mut heading: Option<String> = None;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => {
                heading = Some(String::new());
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(ref mut heading) = heading {
                    heading.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(title) = heading.take() {
                    let title = title.trim().to_string();
                    if !title.is_empty() {
                        return Some(title);
                    }
                }
            }
            _ => {}
        }
    }

    None
}

/// `project-setup.mdx` becomes `Project Setup`.
fn label_from_stem(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled");

    stem.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
