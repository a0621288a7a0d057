//! Frontmatter extraction and parsing.

use serde::Deserialize;

/// Frontmatter keys the renderer reads from a source page.
///
/// Other keys are allowed and ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Frontmatter {
    /// Label the page is listed under in the menu
    #[serde(default)]
    pub name: Option<String>,

    /// Explicit route override
    #[serde(default)]
    pub route: Option<String>,

    /// Name of the menu group the page belongs to
    #[serde(default)]
    pub menu: Option<String>,
}

/// Extract frontmatter from page source.
///
/// Returns the parsed frontmatter and the remaining content after the frontmatter block.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    if yaml_content.is_empty() {
        return Ok((Some(Frontmatter::default()), remaining.trim_start()));
    }

    let frontmatter: Frontmatter = serde_yaml::from_str(yaml_content)
        .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    Ok((Some(frontmatter), remaining.trim_start()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}
