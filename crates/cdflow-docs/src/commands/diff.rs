//! Compare two descriptor revisions.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use cdflow_docs_config::{load, MenuDiff};

/// Run the diff command, returning a human-readable report.
pub async fn run(old: &Path, new: &Path, require_additive: bool) -> Result<String> {
    let old_config = load(old).with_context(|| format!("Failed to load {}", old.display()))?;
    let new_config = load(new).with_context(|| format!("Failed to load {}", new.display()))?;

    let diff = MenuDiff::between(&old_config, &new_config);
    let report = render(&diff);

    if require_additive && !diff.is_additive() {
        anyhow::bail!(
            "{} is not an additive revision of {}:\n{}",
            new.display(),
            old.display(),
            report
        );
    }

    Ok(report)
}

fn render(diff: &MenuDiff) -> String {
    if diff.is_empty() {
        return "menus are identical\n".to_string();
    }

    let mut out = String::new();

    for label in &diff.added_pages {
        let _ = writeln!(out, "+ {label}");
    }
    for label in &diff.removed_pages {
        let _ = writeln!(out, "- {label}");
    }
    for name in &diff.added_groups {
        let _ = writeln!(out, "+ [{name}]");
    }
    for name in &diff.removed_groups {
        let _ = writeln!(out, "- [{name}]");
    }
    for group in &diff.changed_groups {
        let _ = writeln!(out, "~ [{}]", group.name);
        for label in &group.added {
            let _ = writeln!(out, "  + {label}");
        }
        for label in &group.removed {
            let _ = writeln!(out, "  - {label}");
        }
        if !group.order_preserved {
            let _ = writeln!(out, "  ! order changed");
        }
    }
    if !diff.top_order_preserved {
        let _ = writeln!(out, "! top-level order changed");
    }

    let verdict = if diff.is_additive() {
        "additive"
    } else {
        "not additive"
    };
    let _ = writeln!(out, "({verdict})");

    out
}
