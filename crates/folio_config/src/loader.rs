//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::FolioConfig;
use regex::Regex;
use std::path::Path;

/// File name looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "folio.toml";

/// Loads and validates `<project_dir>/folio.toml`.
pub fn load_config(project_dir: &Path) -> Result<FolioConfig, ConfigError> {
    let content = std::fs::read_to_string(project_dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_config_or_default(project_dir: &Path) -> Result<FolioConfig, ConfigError> {
    match load_config(project_dir) {
        Err(ConfigError::IoError(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            Ok(FolioConfig::default())
        }
        other => other,
    }
}

/// Parses and validates configuration text.
pub fn load_config_from_str(content: &str) -> Result<FolioConfig, ConfigError> {
    let config: FolioConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &FolioConfig) -> Result<(), ConfigError> {
    validate_pattern("escape", &config.script.escape)?;
    validate_pattern("comment", &config.script.comment)?;
    Ok(())
}

/// A marker pattern must compile and must not match the empty string, or every
/// line would open an escape run.
fn validate_pattern(field: &'static str, pattern: &str) -> Result<(), ConfigError> {
    let re = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        field,
        reason: e.to_string(),
    })?;
    if re.is_match("") {
        return Err(ConfigError::InvalidPattern {
            field,
            reason: "pattern matches an empty line".to_string(),
        });
    }
    Ok(())
}
