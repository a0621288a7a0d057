//! Loading and serializing descriptor files.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::descriptor::SiteConfig;
use crate::error::ConfigError;

/// Descriptor file looked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "doczrc.toml";

/// Serialization format of a descriptor file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Yaml,
    Json,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
            Self::Json => "JSON",
        };
        f.write_str(name)
    }
}

/// Parse and validate a descriptor.
pub fn parse_str(content: &str, format: Format) -> Result<SiteConfig, ConfigError> {
    let config = parse_unchecked(content, format)?;
    config.validate()?;
    Ok(config)
}

/// Parse a descriptor without structural checks.
pub(crate) fn parse_unchecked(content: &str, format: Format) -> Result<SiteConfig, ConfigError> {
    let parse_error = |message: String| ConfigError::Parse { format, message };

    match format {
        Format::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
    }
}

/// Serialize a descriptor, keeping menu order.
pub fn serialize(config: &SiteConfig, format: Format) -> Result<String, ConfigError> {
    match format {
        Format::Toml => toml::to_string(config).map_err(|e| ConfigError::Serialize(e.to_string())),
        Format::Yaml => {
            serde_yaml::to_string(config).map_err(|e| ConfigError::Serialize(e.to_string()))
        }
        Format::Json => serde_json::to_string_pretty(config)
            .map_err(|e| ConfigError::Serialize(e.to_string())),
    }
}

/// Load a descriptor file, picking the format from its extension.
pub fn load(path: &Path) -> Result<SiteConfig, ConfigError> {
    let format = Format::from_path(path)?;

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_str(&content, format)?;
    tracing::debug!(
        "Loaded {} menu entries from {}",
        config.menu().len(),
        path.display()
    );

    Ok(config)
}

/// Load a descriptor file if it exists, otherwise use the cdflow2 descriptor.
///
/// Returns an error if the file exists but is malformed.
pub fn load_or_default(path: &Path) -> Result<SiteConfig, ConfigError> {
    if path.exists() {
        let config = load(path)?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }

    tracing::debug!("{} not found, using built-in descriptor", path.display());
    Ok(SiteConfig::cdflow2())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::MenuEntry;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const CDFLOW2_TOML: &str = r#"
title = "cdflow2"
description = "deployment tooling for continuous delivery"
base = "/opensource/cdflow2"
menu = [
    "Overview",
    "Installation",
    "Project Setup",
    { name = "Commands", menu = ["Usage", "Setup", "Release", "Deploy", "Destroy", "Common Terraform Setup", "Shell"] },
    "cdflow.yaml Reference",
    "Design",
]
host = "0.0.0.0"
src = "./src"
"#;

    #[test]
    fn parses_toml_descriptor() {
        let config = parse_str(CDFLOW2_TOML, Format::Toml).unwrap();
        assert_eq!(config, SiteConfig::cdflow2());
    }

    #[test]
    fn parses_yaml_descriptor() {
        let yaml = r#"
title: cdflow2
description: deployment tooling for continuous delivery
base: /opensource/cdflow2
menu:
  - Overview
  - Installation
  - Project Setup
  - name: Commands
    menu:
      - Usage
      - Setup
      - Release
      - Deploy
      - Destroy
      - Common Terraform Setup
      - Shell
  - cdflow.yaml Reference
  - Design
host: 0.0.0.0
src: ./src
"#;

        let config = parse_str(yaml, Format::Yaml).unwrap();
        assert_eq!(config, SiteConfig::cdflow2());
    }

    #[test]
    fn json_round_trip_keeps_menu_order() {
        let config = SiteConfig::cdflow2();

        let json = serialize(&config, Format::Json).unwrap();
        let parsed = parse_str(&json, Format::Json).unwrap();

        assert_eq!(parsed.menu(), config.menu());
    }

    #[test]
    fn toml_round_trip_keeps_menu_order() {
        let config = SiteConfig::cdflow2();

        let toml = serialize(&config, Format::Toml).unwrap();
        let parsed = parse_str(&toml, Format::Toml).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn rejects_nested_groups() {
        let toml = r#"
title = "Docs"
description = ""
base = "/"
menu = [{ name = "Outer", menu = [{ name = "Inner", menu = ["Page"] }] }]
host = "127.0.0.1"
src = "./src"
"#;

        let result = parse_str(toml, Format::Toml);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn rejects_other_entry_shapes() {
        let shapes = [
            r#"menu = [42]"#,
            r#"menu = [{ name = "Commands" }]"#,
            r#"menu = [{ name = "Commands", menu = ["Setup"], route = "/x" }]"#,
            r#"menu = [["Overview"]]"#,
        ];

        for shape in shapes {
            let toml = format!(
                "title = \"Docs\"\ndescription = \"\"\nbase = \"/\"\n{shape}\nhost = \"127.0.0.1\"\nsrc = \"./src\"\n"
            );
            let result = parse_str(&toml, Format::Toml);
            assert!(
                matches!(result, Err(ConfigError::Parse { .. })),
                "{shape} should not parse"
            );
        }
    }

    #[test]
    fn rejects_yaml_nested_groups_and_unknown_group_keys() {
        let header = "title: Docs\ndescription: ''\nbase: /\nhost: 127.0.0.1\nsrc: ./src\n";
        let menus = [
            "menu:\n  - name: Outer\n    menu:\n      - name: Inner\n        menu:\n          - Page\n",
            "menu:\n  - name: Commands\n    menu:\n      - Setup\n    route: /x\n",
        ];

        for menu in menus {
            let yaml = format!("{header}{menu}");
            let result = parse_str(&yaml, Format::Yaml);
            assert!(
                matches!(result, Err(ConfigError::Parse { .. })),
                "{menu} should not parse"
            );
        }
    }

    #[test]
    fn rejects_unknown_fields() {
        let toml = format!("{CDFLOW2_TOML}\ntheme = \"dark\"\n");
        assert!(matches!(
            parse_str(&toml, Format::Toml),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn picks_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("doczrc.toml")).unwrap(), Format::Toml);
        assert_eq!(Format::from_path(Path::new("doczrc.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("doczrc.json")).unwrap(), Format::Json);
        assert!(matches!(
            Format::from_path(Path::new("doczrc.js")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("doczrc.toml");
        fs::write(&path, CDFLOW2_TOML).unwrap();

        let config = load(&path).unwrap();

        assert_eq!(config.title(), "cdflow2");
        assert_eq!(
            config.find_group("Commands").map(<[String]>::len),
            Some(7)
        );
        assert!(matches!(config.menu()[3], MenuEntry::Group(_)));
    }

    #[test]
    fn falls_back_to_builtin_descriptor() {
        let temp = tempdir().unwrap();
        let config = load_or_default(&temp.path().join("missing.toml")).unwrap();
        assert_eq!(config, SiteConfig::cdflow2());
    }

    #[test]
    fn surfaces_invalid_files() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("doczrc.toml");
        fs::write(&path, CDFLOW2_TOML.replace("\"./src\"", "\"\"")).unwrap();

        let result = load_or_default(&path);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
