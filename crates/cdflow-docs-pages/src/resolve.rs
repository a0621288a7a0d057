//! Binding menu labels to source pages.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use serde::Serialize;

use cdflow_docs_config::{MenuEntry, SiteConfig};

use crate::discover::SourcePage;

/// A menu label and the page it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPage {
    pub label: String,
    /// Page path relative to `src`, when found
    pub path: Option<PathBuf>,
    pub route: Option<String>,
}

/// A navigation entry with its pages resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavItem {
    Page(ResolvedPage),
    Group {
        name: String,
        pages: Vec<ResolvedPage>,
    },
}

/// Problems found while resolving the menu against the source pages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Issue {
    #[error("menu label `{label}` has no source page")]
    MissingPage {
        label: String,
        group: Option<String>,
    },

    #[error("{} (`{label}`) is not listed in the menu", .path.display())]
    UnlistedPage { path: PathBuf, label: String },

    #[error("label `{label}` is claimed by {} pages", .paths.len())]
    AmbiguousLabel { label: String, paths: Vec<PathBuf> },

    #[error("{} is bound to both `{first}` and `{second}`", .path.display())]
    SharedPage {
        path: PathBuf,
        first: String,
        second: String,
    },

    #[error("`{label}` is listed under {} but its page declares menu `{declared}`", describe_group(.expected))]
    GroupMismatch {
        label: String,
        expected: Option<String>,
        declared: String,
    },
}

fn describe_group(group: &Option<String>) -> String {
    match group {
        Some(name) => format!("`{name}`"),
        None => "the top level".to_string(),
    }
}

/// Navigation tree plus every issue found building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub navigation: Vec<NavItem>,
    pub issues: Vec<Issue>,
}

impl Resolution {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Label lookup over the discovered pages.
struct PageIndex<'a> {
    pages: &'a [SourcePage],
    exact: HashMap<&'a str, Vec<usize>>,
    folded: HashMap<String, Vec<usize>>,
}

impl<'a> PageIndex<'a> {
    fn new(pages: &'a [SourcePage]) -> Self {
        let mut exact: HashMap<&str, Vec<usize>> = HashMap::new();
        let mut folded: HashMap<String, Vec<usize>> = HashMap::new();

        for (index, page) in pages.iter().enumerate() {
            let label = page.label.trim();
            exact.entry(label).or_default().push(index);
            folded.entry(label.to_lowercase()).or_default().push(index);
        }

        Self {
            pages,
            exact,
            folded,
        }
    }

    /// Candidate pages for a label: exact matches, else case-insensitive ones.
    fn lookup(&self, label: &str) -> &[usize] {
        let label = label.trim();
        self.exact
            .get(label)
            .or_else(|| self.folded.get(&label.to_lowercase()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Resolve every menu label of `config` against `pages`.
///
/// The descriptor is not modified; labels that cannot be bound are reported as
/// issues and left unresolved in the navigation.
pub fn resolve(config: &SiteConfig, pages: &[SourcePage]) -> Resolution {
    let index = PageIndex::new(pages);
    let mut used = HashSet::new();
    let mut bound: HashMap<usize, String> = HashMap::new();
    let mut issues = Vec::new();

    let mut bind = |label: &str, group: Option<&str>| -> ResolvedPage {
        let candidates = index.lookup(label);
        used.extend(candidates.iter().copied());

        match candidates {
            [] => {
                issues.push(Issue::MissingPage {
                    label: label.to_string(),
                    group: group.map(str::to_string),
                });
                unresolved(label)
            }
            [only] => {
                let page = &index.pages[*only];
                if let Some(first) = bound.get(only) {
                    issues.push(Issue::SharedPage {
                        path: page.path.clone(),
                        first: first.clone(),
                        second: label.to_string(),
                    });
                } else {
                    bound.insert(*only, label.to_string());
                }
                if let Some(declared) = &page.group {
                    if Some(declared.as_str()) != group {
                        issues.push(Issue::GroupMismatch {
                            label: label.to_string(),
                            expected: group.map(str::to_string),
                            declared: declared.clone(),
                        });
                    }
                }
                ResolvedPage {
                    label: label.to_string(),
                    path: Some(page.path.clone()),
                    route: page.route.clone(),
                }
            }
            many => {
                issues.push(Issue::AmbiguousLabel {
                    label: label.to_string(),
                    paths: many.iter().map(|i| index.pages[*i].path.clone()).collect(),
                });
                unresolved(label)
            }
        }
    };

    let navigation: Vec<NavItem> = config
        .menu()
        .iter()
        .map(|entry| match entry {
            MenuEntry::Page(label) => NavItem::Page(bind(label, None)),
            MenuEntry::Group(group) => NavItem::Group {
                name: group.name.clone(),
                pages: group
                    .menu
                    .iter()
                    .map(|label| bind(label, Some(group.name.as_str())))
                    .collect(),
            },
        })
        .collect();

    for (i, page) in pages.iter().enumerate() {
        if !used.contains(&i) {
            issues.push(Issue::UnlistedPage {
                path: page.path.clone(),
                label: page.label.clone(),
            });
        }
    }

    if !issues.is_empty() {
        tracing::debug!("Resolved menu with {} issues", issues.len());
    }

    Resolution { navigation, issues }
}

fn unresolved(label: &str) -> ResolvedPage {
    ResolvedPage {
        label: label.to_string(),
        path: None,
        route: None,
    }
}
