//! Structural checks on a descriptor.
//!
//! Checks never stop at the first problem; callers get every violation so a
//! hand-edited descriptor can be fixed in one pass.

use std::collections::HashSet;
use std::net::IpAddr;
use std::path::Path;

use crate::descriptor::{MenuEntry, SiteConfig};

/// A single structural problem with a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("`{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("empty label at {position}")]
    EmptyLabel { position: String },

    #[error("group `{0}` has no pages")]
    EmptyGroup(String),

    #[error("label `{0}` appears more than once")]
    DuplicateLabel(String),

    #[error("base `{0}` must start with `/`")]
    BaseNotAbsolute(String),

    #[error("src `{0}` must be a relative path")]
    SrcNotRelative(String),

    #[error("host `{0}` is not an IP address or `localhost`")]
    InvalidHost(String),
}

/// Check a descriptor and return every violation found.
pub fn validate(config: &SiteConfig) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_fields(config, &mut violations);
    check_menu(config.menu(), &mut violations);

    violations
}

fn check_fields(config: &SiteConfig, violations: &mut Vec<Violation>) {
    let required = [
        ("title", config.title()),
        ("base", config.base()),
        ("host", config.host()),
        ("src", config.src()),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            violations.push(Violation::EmptyField(field));
        }
    }

    let base = config.base().trim();
    if !base.is_empty() && !base.starts_with('/') {
        violations.push(Violation::BaseNotAbsolute(config.base().to_string()));
    }

    let src = config.src().trim();
    if !src.is_empty() && !Path::new(src).is_relative() {
        violations.push(Violation::SrcNotRelative(config.src().to_string()));
    }

    let host = config.host().trim();
    if !host.is_empty() && host != "localhost" && host.parse::<IpAddr>().is_err() {
        violations.push(Violation::InvalidHost(config.host().to_string()));
    }
}

fn check_menu(menu: &[MenuEntry], violations: &mut Vec<Violation>) {
    let mut seen = HashSet::new();

    for (index, entry) in menu.iter().enumerate() {
        match entry {
            MenuEntry::Page(label) => {
                check_label(label, format!("menu[{index}]"), &mut seen, violations);
            }
            MenuEntry::Group(group) => {
                if group.name.trim().is_empty() {
                    violations.push(Violation::EmptyLabel {
                        position: format!("menu[{index}].name"),
                    });
                }
                if group.menu.is_empty() {
                    violations.push(Violation::EmptyGroup(group.name.clone()));
                }
                for (nested, label) in group.menu.iter().enumerate() {
                    check_label(
                        label,
                        format!("menu[{index}].menu[{nested}]"),
                        &mut seen,
                        violations,
                    );
                }
            }
        }
    }
}

/// Labels are compared case-insensitively, the same way pages are looked up.
fn check_label(
    label: &str,
    position: String,
    seen: &mut HashSet<String>,
    violations: &mut Vec<Violation>,
) {
    let label = label.trim();
    if label.is_empty() {
        violations.push(Violation::EmptyLabel { position });
        return;
    }
    if !seen.insert(label.to_lowercase()) {
        violations.push(Violation::DuplicateLabel(label.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::loader::{parse_unchecked, Format};

    fn config(toml: &str) -> SiteConfig {
        parse_unchecked(toml, Format::Toml).unwrap()
    }

    #[test]
    fn accepts_cdflow2() {
        assert!(validate(&SiteConfig::cdflow2()).is_empty());
    }

    #[test]
    fn reports_empty_fields() {
        let config = config(
            r#"
title = "Docs"
description = ""
base = ""
menu = ["Overview"]
host = " "
src = ""
"#,
        );

        let violations = validate(&config);

        assert!(violations.contains(&Violation::EmptyField("base")));
        assert!(violations.contains(&Violation::EmptyField("host")));
        assert!(violations.contains(&Violation::EmptyField("src")));
        assert!(!violations.contains(&Violation::EmptyField("title")));
    }

    #[test]
    fn reports_every_menu_problem() {
        let config = config(
            r#"
title = "Docs"
description = ""
base = "/"
menu = ["Overview", "", { name = "Commands", menu = [] }, { name = "More", menu = ["Overview"] }]
host = "127.0.0.1"
src = "./src"
"#,
        );

        let violations = validate(&config);

        assert_eq!(
            violations,
            vec![
                Violation::EmptyLabel {
                    position: "menu[1]".to_string()
                },
                Violation::EmptyGroup("Commands".to_string()),
                Violation::DuplicateLabel("Overview".to_string()),
            ]
        );
    }

    #[test]
    fn duplicate_labels_ignore_case() {
        let result = SiteConfig::builder("Docs")
            .page("Setup")
            .group("Commands", ["setup"])
            .build();

        match result {
            Err(ConfigError::Invalid(violations)) => {
                assert_eq!(violations, vec![Violation::DuplicateLabel("setup".to_string())]);
            }
            other => panic!("expected duplicate label, got {other:?}"),
        }
    }

    #[test]
    fn reports_empty_group_name() {
        let config = config(
            r#"
title = "Docs"
description = ""
base = "/"
menu = ["Overview", { name = " ", menu = ["Setup"] }]
host = "127.0.0.1"
src = "./src"
"#,
        );

        assert_eq!(
            validate(&config),
            vec![Violation::EmptyLabel {
                position: "menu[1].name".to_string()
            }]
        );
    }

    #[test]
    fn reports_malformed_paths_and_host() {
        let config = config(
            r#"
title = "Docs"
description = ""
base = "docs"
menu = ["Overview"]
host = "not a host"
src = "/abs/src"
"#,
        );

        let violations = validate(&config);

        assert!(violations.contains(&Violation::BaseNotAbsolute("docs".to_string())));
        assert!(violations.contains(&Violation::SrcNotRelative("/abs/src".to_string())));
        assert!(violations.contains(&Violation::InvalidHost("not a host".to_string())));
    }

    #[test]
    fn accepts_localhost_and_ipv6() {
        for host in ["localhost", "::1", "0.0.0.0"] {
            let config = SiteConfig::builder("Docs").host(host).page("Intro").build();
            assert!(config.is_ok(), "host {host} should be accepted");
        }
    }
}
