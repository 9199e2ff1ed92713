//! Configuration management for the CLI
//!
//! Configuration comes from, in order of precedence:
//! - the file named by `--config` or `FLEXBIND_CONFIG`
//! - the first existing default location
//! - compiled-in defaults
//!
//! The file format is chosen by extension (TOML, YAML or JSON).

use crate::error::{Error, Result};
use flexbind_core::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generator settings
    pub generator: GeneratorConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingSettings,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration from the file; the command line and environment win
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Toml,
    Yaml,
    Json,
}

impl FileFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Some(Self::Toml),
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let format = FileFormat::from_path(path).ok_or_else(|| Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "a .toml, .yaml, .yml or .json file".to_string(),
        })?;

        let content = std::fs::read_to_string(path)?;
        let config = match format {
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
            FileFormat::Json => serde_json::from_str(&content)?,
        };

        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.generator.validate()?;
        Ok(config)
    }

    /// Default configuration file paths, checked in order
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".flexbind.toml"),
            PathBuf::from(".flexbind.yaml"),
            PathBuf::from(".flexbind.yml"),
            PathBuf::from(".flexbind.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let flexbind_dir = config_dir.join("flexbind");
            paths.push(flexbind_dir.join("config.toml"));
            paths.push(flexbind_dir.join("config.yaml"));
            paths.push(flexbind_dir.join("config.json"));
        }

        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_toml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flexbind.toml");
        fs::write(
            &path,
            r#"
[generator]
namespace = "Demo.Flex"
output = "generated/base.cs"

[generator.introspection]
header = "include/flex.h"

[logging]
level = "debug"
"#,
        )
        .unwrap();

        let config = Config::load_with_file(Some(&path)).unwrap();
        assert_eq!(config.generator.namespace, "Demo.Flex");
        assert_eq!(config.generator.output, PathBuf::from("generated/base.cs"));
        assert_eq!(
            config.generator.introspection.header,
            PathBuf::from("include/flex.h")
        );
        assert_eq!(
            config.generator.introspection.program,
            PathBuf::from("/usr/bin/gen_bridge_metadata")
        );
        assert_eq!(config.generator.library, "flex");
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert!(config.output.color);
    }

    #[test]
    fn test_yaml_and_json_config() {
        let dir = TempDir::new().unwrap();

        let yaml = dir.path().join("flexbind.yaml");
        fs::write(&yaml, "generator:\n  library: flexcore\noutput:\n  progress: false\n").unwrap();
        let config = Config::from_file(&yaml).unwrap();
        assert_eq!(config.generator.library, "flexcore");
        assert!(!config.output.progress);

        let json = dir.path().join("flexbind.json");
        fs::write(&json, r#"{"generator": {"enum_overrides": {}}}"#).unwrap();
        let config = Config::from_file(&json).unwrap();
        assert!(config.generator.enum_overrides.is_empty());
    }

    #[test]
    fn test_unknown_extension_and_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flexbind.ini");
        fs::write(&path, "").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(Error::InvalidFormat { .. })
        ));

        assert!(matches!(
            Config::from_file(&dir.path().join("missing.toml")),
            Err(Error::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_generator_config_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("flexbind.toml");
        fs::write(&path, "[generator]\nlibrary = \"\"\n").unwrap();
        assert!(matches!(
            Config::load_with_file(Some(&path)),
            Err(Error::Core(flexbind_core::Error::Configuration { .. }))
        ));
    }
}
