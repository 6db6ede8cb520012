// src/system/config.rs

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILENAME};
use crate::core::context::Severity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not find system config directory.")]
    ConfigDirNotFound,
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse console config: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to expand config path '{path}': {message}")]
    Expand { path: String, message: String },
}

/// Settings of the interactive shell, as read from `console.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub console: ConsoleSection,
    pub logger: LoggerSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleSection {
    /// How many suggestions are printed for a `?` query.
    pub max_suggestion_count: usize,
    /// How many lines the in-memory history keeps.
    pub max_history_count: usize,
}

impl Default for ConsoleSection {
    fn default() -> Self {
        Self {
            max_suggestion_count: 8,
            max_history_count: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerSection {
    pub min_severity: Severity,
    pub enabled: bool,
}

impl Default for LoggerSection {
    fn default() -> Self {
        Self {
            min_severity: Severity::Info,
            enabled: true,
        }
    }
}

/// Parses a config document. Missing sections and keys take their defaults.
pub fn parse_config(content: &str) -> Result<ConsoleConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Loads the config at `path`. A file that does not exist yields the defaults.
pub fn load_config(path: &Path) -> Result<ConsoleConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("No config at '{}', using defaults", path.display());
            return Ok(ConsoleConfig::default());
        }
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    log::debug!("Loading config from '{}'", path.display());
    parse_config(&content)
}

/// The config file to load: `explicit` with `~` and environment variables
/// expanded, or `<config_dir>/trieshell/console.toml`.
pub fn resolve_config_path(explicit: Option<&str>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(template) => {
            // `shellexpand::full` handles both the home dir and env vars.
            let expanded = shellexpand::full(template).map_err(|e| ConfigError::Expand {
                path: template.to_owned(),
                message: e.to_string(),
            })?;
            Ok(PathBuf::from(expanded.into_owned()))
        }
        None => dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILENAME))
            .ok_or(ConfigError::ConfigDirNotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("console.toml")).unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.console.max_suggestion_count, 8);
        assert_eq!(config.console.max_history_count, 64);
        assert!(config.logger.enabled);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[logger]\nmin_severity = \"warn\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.logger.min_severity, Severity::Warning);
        assert!(config.logger.enabled);
        assert_eq!(config.console, ConsoleSection::default());
    }

    #[test]
    fn test_full_document() {
        let config = parse_config(
            r#"
            [console]
            max_suggestion_count = 3
            max_history_count = 10

            [logger]
            min_severity = "error"
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.console.max_suggestion_count, 3);
        assert_eq!(config.console.max_history_count, 10);
        assert_eq!(config.logger.min_severity, Severity::Error);
        assert!(!config.logger.enabled);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(matches!(
            parse_config("[console]\nmax_suggestions = 3"),
            Err(ConfigError::TomlParse(_))
        ));
        assert!(parse_config("[logger]\nmin_severity = \"loud\"").is_err());
    }

    #[test]
    fn test_explicit_path_is_expanded() {
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("c.toml");
        let plain = plain.to_str().unwrap();
        assert_eq!(resolve_config_path(Some(plain)).unwrap(), PathBuf::from(plain));

        assert!(matches!(
            resolve_config_path(Some("$TRIESHELL_SURELY_UNSET_VAR/c.toml")),
            Err(ConfigError::Expand { .. })
        ));
    }
}
