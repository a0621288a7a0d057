//! Source page discovery and menu resolution for the cdflow2 docs.
//!
//! The renderer maps every menu label to a page under the descriptor's `src`
//! directory. This crate performs the same lookup ahead of time so broken
//! navigation can be caught without running the renderer.

pub mod discover;
pub mod frontmatter;
pub mod resolve;

pub use discover::{discover_pages, PagesError, SourcePage};
pub use frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
pub use resolve::{resolve, Issue, NavItem, Resolution, ResolvedPage};
