//! Site configuration descriptor for the cdflow2 documentation.
//!
//! This crate provides the static descriptor an external documentation renderer
//! consumes: site metadata, the navigation menu, the mount base, the preview host
//! and the source directory. It can load descriptors from TOML, YAML or JSON,
//! check them structurally and compare two revisions of the menu.

pub mod descriptor;
pub mod error;
pub mod loader;
pub mod revision;
pub mod validate;

pub use descriptor::{MenuEntry, MenuGroup, SiteConfig, SiteConfigBuilder};
pub use error::ConfigError;
pub use loader::{load, load_or_default, parse_str, serialize, Format, DEFAULT_CONFIG_FILE};
pub use revision::{GroupDiff, MenuDiff};
pub use validate::{validate, Violation};
