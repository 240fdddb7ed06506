//! # tfvars-atlantis
//!
//! Generates an Atlantis repo-level configuration (`atlantis.yaml`) for
//! Terraform repositories that keep one `.tfvars` file per environment.
//!
//! ## Features
//!
//! - **Component Discovery**: Finds every directory holding `*.tf` files and the variable files it owns
//! - **Project Generation**: One Atlantis project per component and variable file, with optional workspaces, version pins and autoplan
//! - **Workflow Generation**: Matching plan/apply workflows passing `-var-file`, with optional multienv exports
//! - **Deterministic Output**: Stable key and project order for reproducible diffs
//!
//! ## Example
//!
//! ```rust,no_run
//! use tfvars_atlantis::{discover, generate_repo_config, EnvSnapshot};
//! use tfvars_atlantis::config::types::{DiscoveryConfig, GenerationOptions};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let associations = discover(Path::new("./infra"), &DiscoveryConfig::default())?;
//! let config = generate_repo_config(&associations, &GenerationOptions::default(), &EnvSnapshot::capture())?;
//! println!("{}", tfvars_atlantis::generator::render(&config, false)?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod common;
pub mod config;
pub mod discovery;
pub mod error;
pub mod generator;

// Re-export commonly used types and functions
pub use discovery::{discover, Association};
pub use error::{AtlantisConfigError, Result};
pub use generator::{generate_repo_config, EnvSnapshot, RepoConfig};

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
