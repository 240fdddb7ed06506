pub mod types;

use crate::error::{ConfigError, Result};
use std::fs;
use std::path::Path;

/// Load configuration from file or use defaults
pub fn load_config(path: Option<&Path>) -> Result<types::Config> {
    let Some(path) = path else {
        return Ok(types::Config::default());
    };

    let content = fs::read_to_string(path).map_err(|e| ConfigError::InvalidFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    log::debug!("Loaded configuration from {}", path.display());
    parse_config(&content)
}

/// Parse a TOML configuration document. Missing keys fall back to defaults.
pub fn parse_config(content: &str) -> Result<types::Config> {
    toml::from_str(content).map_err(|e| ConfigError::ParsingFailed(e.to_string()).into())
}
