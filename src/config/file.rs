//! Configuration file loading.
//!
//! This module handles loading studium-ai configuration from TOML files
//! at XDG-compliant locations.

use crate::config::types::StudiumConfig;
use crate::error::{StudiumError, StudiumErrorKind};
use std::path::{Path, PathBuf};

/// Default configuration file name for project-local config.
const LOCAL_CONFIG_NAME: &str = "studium-ai.toml";

/// Default configuration file name within XDG config directory.
const XDG_CONFIG_NAME: &str = "config.toml";

/// Application name for XDG directory lookup.
const APP_NAME: &str = "studium-ai";

/// Loads configuration from the default search paths.
///
/// Search order:
/// 1. `./studium-ai.toml` (project-local)
/// 2. `~/.config/studium-ai/config.toml` (XDG config)
///
/// Returns the default configuration if no config file is found.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed, or if
/// the parsed configuration fails validation.
pub fn load() -> Result<StudiumConfig, StudiumError> {
    // Try project-local config first
    let local_path = PathBuf::from(LOCAL_CONFIG_NAME);
    if local_path.exists() {
        return from_path(&local_path);
    }

    // Try XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        let xdg_path = config_dir.join(APP_NAME).join(XDG_CONFIG_NAME);
        if xdg_path.exists() {
            return from_path(&xdg_path);
        }
    }

    // No config file found - return defaults
    Ok(StudiumConfig::default())
}

/// Loads configuration from a specific file path.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file contains invalid TOML
/// - The parsed configuration fails validation
pub fn from_path(path: &Path) -> Result<StudiumConfig, StudiumError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        StudiumError::new(StudiumErrorKind::Configuration {
            field: "config_file".to_string(),
            reason: format!("failed to read '{}': {}", path.display(), e),
        })
    })?;

    from_str(&contents).map_err(|e| {
        StudiumError::new(StudiumErrorKind::Configuration {
            field: "config_file".to_string(),
            reason: format!("failed to parse '{}': {}", path.display(), e),
        })
    })
}

/// Parses configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid, doesn't match the schema, or
/// fails validation.
///
/// # Example
///
/// ```rust,ignore
/// use studium_ai::config::from_str;
///
/// let toml = r#"
/// [plugin]
/// default_mode = "auto"
///
/// [context]
/// default_limit = 5
/// "#;
///
/// let config = from_str(toml)?;
/// ```
pub fn from_str(toml_str: &str) -> Result<StudiumConfig, StudiumError> {
    let config: StudiumConfig = toml::from_str(toml_str).map_err(|e| {
        StudiumError::new(StudiumErrorKind::Configuration {
            field: "config".to_string(),
            reason: format!("invalid TOML: {e}"),
        })
    })?;
    config.validate()?;
    Ok(config)
}

/// Returns the paths that would be searched for configuration files.
///
/// This is useful for diagnostics and user guidance.
#[must_use]
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_NAME)];

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_NAME).join(XDG_CONFIG_NAME));
    }

    paths
}

/// Returns the path to the XDG config directory for studium-ai.
///
/// This is `~/.config/studium-ai` on most systems.
#[must_use]
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME))
}
