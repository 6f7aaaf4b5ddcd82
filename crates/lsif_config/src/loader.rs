//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{Config, LOG_LEVELS};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "lsif.toml";

/// Loads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that configuration values are consistent.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if let Some(dir) = &config.cache.dir {
        if dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "cache.dir must not be empty".to_string(),
            ));
        }
    }
    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "unknown log level '{}', expected one of {}",
            config.log.level,
            LOG_LEVELS.join(", ")
        )));
    }
    Ok(())
}
