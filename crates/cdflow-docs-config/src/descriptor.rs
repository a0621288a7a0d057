//! The site descriptor and its menu entries.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::validate::validate;

/// Static configuration consumed by the documentation renderer.
///
/// The descriptor is read-only once constructed. Menu order is the order the
/// renderer displays navigation in, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title
    title: String,

    /// Short site description
    description: String,

    /// URL path prefix the generated site is mounted under
    base: String,

    /// Navigation menu
    menu: Vec<MenuEntry>,

    /// Bind address for the local preview server
    host: String,

    /// Directory containing the documentation source pages
    src: String,
}

/// A single navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuEntry {
    /// A top-level page, named by its label
    Page(String),

    /// A labeled submenu of pages
    Group(MenuGroup),
}

/// A labeled submenu. Groups hold plain page labels only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuGroup {
    /// Submenu label
    pub name: String,

    /// Page labels in display order
    pub menu: Vec<String>,
}

impl MenuEntry {
    /// Create a page entry.
    pub fn page(label: impl Into<String>) -> Self {
        Self::Page(label.into())
    }

    /// Create a group entry.
    pub fn group<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Group(MenuGroup {
            name: name.into(),
            menu: labels.into_iter().map(Into::into).collect(),
        })
    }

    /// The page label, or the group name for a group.
    pub fn label(&self) -> &str {
        match self {
            Self::Page(label) => label,
            Self::Group(group) => &group.name,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Page labels this entry contributes to the navigation.
    pub fn pages(&self) -> &[String] {
        match self {
            Self::Page(label) => std::slice::from_ref(label),
            Self::Group(group) => &group.menu,
        }
    }
}

impl SiteConfig {
    /// The authoritative descriptor for the cdflow2 documentation.
    pub fn cdflow2() -> Self {
        Self {
            title: "cdflow2".to_string(),
            description: "deployment tooling for continuous delivery".to_string(),
            base: "/opensource/cdflow2".to_string(),
            menu: vec![
                MenuEntry::page("Overview"),
                MenuEntry::page("Installation"),
                MenuEntry::page("Project Setup"),
                MenuEntry::group(
                    "Commands",
                    [
                        "Usage",
                        "Setup",
                        "Release",
                        "Deploy",
                        "Destroy",
                        "Common Terraform Setup",
                        "Shell",
                    ],
                ),
                MenuEntry::page("cdflow.yaml Reference"),
                MenuEntry::page("Design"),
            ],
            host: "0.0.0.0".to_string(),
            src: "./src".to_string(),
        }
    }

    /// Start building a descriptor with the given title.
    pub fn builder(title: impl Into<String>) -> SiteConfigBuilder {
        SiteConfigBuilder::new(title)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn menu(&self) -> &[MenuEntry] {
        &self.menu
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    /// Every page label in display order, with groups flattened.
    ///
    /// Group names are not page labels and are not included.
    pub fn labels(&self) -> Vec<&str> {
        self.menu
            .iter()
            .flat_map(|entry| entry.pages().iter().map(String::as_str))
            .collect()
    }

    /// Grouping entries as `(name, labels)` pairs, in menu order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.menu.iter().filter_map(|entry| match entry {
            MenuEntry::Group(group) => Some((group.name.as_str(), group.menu.as_slice())),
            MenuEntry::Page(_) => None,
        })
    }

    /// Labels of the named group.
    pub fn find_group(&self, name: &str) -> Option<&[String]> {
        self.groups()
            .find(|(group, _)| *group == name)
            .map(|(_, labels)| labels)
    }

    /// Name of the group containing `label`, if it is nested.
    pub fn group_of(&self, label: &str) -> Option<&str> {
        self.groups()
            .find(|(_, labels)| labels.iter().any(|l| l == label))
            .map(|(name, _)| name)
    }

    /// Check the descriptor, reporting every violation at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let violations = validate(self);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(violations))
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::cdflow2()
    }
}

/// Builder for hand-authored descriptors.
#[derive(Debug, Clone)]
pub struct SiteConfigBuilder {
    title: String,
    description: String,
    base: String,
    menu: Vec<MenuEntry>,
    host: String,
    src: String,
}

impl SiteConfigBuilder {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            base: "/".to_string(),
            menu: Vec::new(),
            host: "127.0.0.1".to_string(),
            src: "./src".to_string(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn src(mut self, src: impl Into<String>) -> Self {
        self.src = src.into();
        self
    }

    /// Append a top-level page.
    pub fn page(mut self, label: impl Into<String>) -> Self {
        self.menu.push(MenuEntry::page(label));
        self
    }

    /// Append a submenu.
    pub fn group<I, S>(mut self, name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.menu.push(MenuEntry::group(name, labels));
        self
    }

    /// Finish the descriptor. Fails if it does not validate.
    pub fn build(self) -> Result<SiteConfig, ConfigError> {
        let config = SiteConfig {
            title: self.title,
            description: self.description,
            base: self.base,
            menu: self.menu,
            host: self.host,
            src: self.src,
        };
        config.validate()?;
        Ok(config)
    }
}
