//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.textbridge/config.toml` (global user preferences)
//! 3. **Project config** - `./.textbridge/config.toml` (directory-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::{AccessibilityConfig, TextBridgeConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

/// Directory name holding the config file, under both home and the working directory.
pub const CONFIG_DIR_NAME: &str = ".textbridge";

/// Config file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// Loads and merges configuration from:
/// 1. Default values
/// 2. User config (`~/.textbridge/config.toml`)
/// 3. Project config (`./.textbridge/config.toml`)
///
/// # Errors
///
/// Returns an error if a file exists but cannot be read or parsed, or if
/// validation fails. Missing config files are not errors.
pub fn load_hierarchy() -> Result<TextBridgeConfig, ConfigError> {
    let project_root = std::env::current_dir()?;
    load_hierarchy_from(dirs::home_dir().as_deref(), &project_root)
}

/// Load the hierarchy rooted at explicit directories.
///
/// `home` is `None` when no home directory can be determined, in which case
/// only the project config is consulted.
pub fn load_hierarchy_from(
    home: Option<&Path>,
    project_root: &Path,
) -> Result<TextBridgeConfig, ConfigError> {
    let mut config = TextBridgeConfig::default();

    let sources = home
        .map(config_path_in)
        .into_iter()
        .chain(std::iter::once(config_path_in(project_root)));

    for path in sources {
        match load_config_file(&path) {
            Ok(file_config) => {
                debug!(
                    event = "core.config.file_loaded",
                    path = %path.display()
                );
                config = merge_configs(config, file_config);
            }
            Err(e) if e.is_file_not_found() => {}
            Err(e) => return Err(e),
        }
    }

    validate_config(&config)?;

    Ok(config)
}

fn config_path_in(dir: &Path) -> PathBuf {
    dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<TextBridgeConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ConfigReadError {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Optional fields in the override replace base values only if present.
pub fn merge_configs(base: TextBridgeConfig, override_config: TextBridgeConfig) -> TextBridgeConfig {
    TextBridgeConfig {
        accessibility: AccessibilityConfig {
            messaging_timeout_ms: override_config
                .accessibility
                .messaging_timeout_ms
                .or(base.accessibility.messaging_timeout_ms),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(root: &Path, content: &str) {
        let dir = root.join(CONFIG_DIR_NAME);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONFIG_FILE_NAME), content).unwrap();
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let home = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();

        let config = load_hierarchy_from(Some(home.path()), project.path()).unwrap();
        assert_eq!(config, TextBridgeConfig::default());
    }

    #[test]
    fn test_no_home_directory() {
        let project = tempfile::tempdir().unwrap();
        write_config(
            project.path(),
            "[accessibility]\nmessaging_timeout_ms = 300\n",
        );

        let config = load_hierarchy_from(None, project.path()).unwrap();
        assert_eq!(config.accessibility.messaging_timeout_ms, Some(300));
    }

    #[test]
    fn test_project_overrides_user() {
        let home = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        write_config(home.path(), "[accessibility]\nmessaging_timeout_ms = 500\n");
        write_config(
            project.path(),
            "[accessibility]\nmessaging_timeout_ms = 2000\n",
        );

        let config = load_hierarchy_from(Some(home.path()), project.path()).unwrap();
        assert_eq!(config.accessibility.messaging_timeout_ms, Some(2000));
    }

    #[test]
    fn test_user_value_survives_empty_project_config() {
        let home = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        write_config(home.path(), "[accessibility]\nmessaging_timeout_ms = 500\n");
        write_config(project.path(), "");

        let config = load_hierarchy_from(Some(home.path()), project.path()).unwrap();
        assert_eq!(config.accessibility.messaging_timeout_ms, Some(500));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let home = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        write_config(project.path(), "invalid toml [[[");

        let result = load_hierarchy_from(Some(home.path()), project.path());
        match result {
            Err(ConfigError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("config.toml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_value_fails_validation() {
        let home = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        write_config(home.path(), "[accessibility]\nmessaging_timeout_ms = 0\n");

        let result = load_hierarchy_from(Some(home.path()), project.path());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_merge_keeps_base_when_override_unset() {
        let base = TextBridgeConfig {
            accessibility: AccessibilityConfig {
                messaging_timeout_ms: Some(750),
            },
        };
        let merged = merge_configs(base, TextBridgeConfig::default());
        assert_eq!(merged.accessibility.messaging_timeout_ms, Some(750));
    }
}
