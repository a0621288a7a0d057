//! Comparing two revisions of a descriptor's menu.
//!
//! Descriptors grow as pages are written: new labels appear, existing ones keep
//! their relative order. [`MenuDiff`] reports what changed between two revisions
//! and whether the change was purely additive.

use std::collections::HashSet;

use serde::Serialize;

use crate::descriptor::{MenuEntry, SiteConfig};

/// Changes to a single group present in both revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupDiff {
    /// Group name
    pub name: String,
    /// Labels only in the newer revision, in its order
    pub added: Vec<String>,
    /// Labels only in the older revision, in its order
    pub removed: Vec<String>,
    /// Whether shared labels keep their relative order
    pub order_preserved: bool,
}

/// Menu changes between two descriptor revisions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MenuDiff {
    pub added_pages: Vec<String>,
    pub removed_pages: Vec<String>,
    pub added_groups: Vec<String>,
    pub removed_groups: Vec<String>,
    pub changed_groups: Vec<GroupDiff>,
    /// Whether shared top-level entries keep their relative order
    pub top_order_preserved: bool,
}

/// Identity of a top-level entry. A page and a group may share a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum EntryKey<'a> {
    Page(&'a str),
    Group(&'a str),
}

impl<'a> From<&'a MenuEntry> for EntryKey<'a> {
    fn from(entry: &'a MenuEntry) -> Self {
        match entry {
            MenuEntry::Page(label) => Self::Page(label),
            MenuEntry::Group(group) => Self::Group(&group.name),
        }
    }
}

impl MenuDiff {
    /// Compare the menu of `old` against the menu of `new`.
    pub fn between(old: &SiteConfig, new: &SiteConfig) -> Self {
        let old_keys: Vec<EntryKey> = old.menu().iter().map(EntryKey::from).collect();
        let new_keys: Vec<EntryKey> = new.menu().iter().map(EntryKey::from).collect();

        let mut diff = MenuDiff {
            top_order_preserved: order_preserved(&old_keys, &new_keys),
            ..Default::default()
        };

        for key in only_in(&new_keys, &old_keys) {
            match key {
                EntryKey::Page(label) => diff.added_pages.push(label.to_string()),
                EntryKey::Group(name) => diff.added_groups.push(name.to_string()),
            }
        }

        for key in only_in(&old_keys, &new_keys) {
            match key {
                EntryKey::Page(label) => diff.removed_pages.push(label.to_string()),
                EntryKey::Group(name) => diff.removed_groups.push(name.to_string()),
            }
        }

        for (name, old_labels) in old.groups() {
            let Some(new_labels) = new.find_group(name) else {
                continue;
            };

            let old_labels: Vec<&str> = old_labels.iter().map(String::as_str).collect();
            let new_labels: Vec<&str> = new_labels.iter().map(String::as_str).collect();

            let group = GroupDiff {
                name: name.to_string(),
                added: owned(only_in(&new_labels, &old_labels)),
                removed: owned(only_in(&old_labels, &new_labels)),
                order_preserved: order_preserved(&old_labels, &new_labels),
            };

            if !group.added.is_empty() || !group.removed.is_empty() || !group.order_preserved {
                diff.changed_groups.push(group);
            }
        }

        diff
    }

    /// True when nothing differs between the two menus.
    pub fn is_empty(&self) -> bool {
        self.added_pages.is_empty()
            && self.removed_pages.is_empty()
            && self.added_groups.is_empty()
            && self.removed_groups.is_empty()
            && self.changed_groups.is_empty()
            && self.top_order_preserved
    }

    /// True when the newer menu only adds entries and keeps existing order.
    pub fn is_additive(&self) -> bool {
        self.removed_pages.is_empty()
            && self.removed_groups.is_empty()
            && self.top_order_preserved
            && self
                .changed_groups
                .iter()
                .all(|g| g.removed.is_empty() && g.order_preserved)
    }
}

/// Items of `items` absent from `other`, in the order of `items`.
fn only_in<T: Copy + Eq + std::hash::Hash>(items: &[T], other: &[T]) -> Vec<T> {
    let other: HashSet<T> = other.iter().copied().collect();
    items.iter().copied().filter(|i| !other.contains(i)).collect()
}

/// Whether items shared by both sequences appear in the same relative order.
fn order_preserved<T: Copy + Eq + std::hash::Hash>(old: &[T], new: &[T]) -> bool {
    let old_set: HashSet<T> = old.iter().copied().collect();
    let new_set: HashSet<T> = new.iter().copied().collect();

    let old_common = old.iter().filter(|i| new_set.contains(i));
    let new_common = new.iter().filter(|i| old_set.contains(i));

    old_common.eq(new_common)
}

fn owned(labels: Vec<&str>) -> Vec<String> {
    labels.into_iter().map(str::to_string).collect()
}
