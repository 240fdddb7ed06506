use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlantisConfigError {
    #[error("Component discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Config generation failed: {0}")]
    Generation(#[from] GeneratorError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Invalid scan root {path}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("Failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Invalid project for component '{component}' with var file '{variable_file}': {reason}")]
    InvalidProject {
        component: String,
        variable_file: String,
        reason: String,
    },

    #[error("Environment variable {0} is not set, no workspace for multienv")]
    MissingWorkspace(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file {path}: {reason}")]
    InvalidFile { path: PathBuf, reason: String },

    #[error("Configuration parsing failed: {0}")]
    ParsingFailed(String),
}

pub type Result<T> = std::result::Result<T, AtlantisConfigError>;
