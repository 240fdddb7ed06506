use crate::config::types::GenerationOptions;
use crate::discovery::Association;
use crate::error::Result;

pub mod multienv;
pub mod naming;
pub mod project_gen;
pub mod repo_config;
pub mod schema;
pub mod workflow_gen;

pub use multienv::EnvSnapshot;
pub use schema::RepoConfig;

/// Generate the Atlantis repo config for a set of discovered associations
pub fn generate_repo_config(
    associations: &[Association],
    options: &GenerationOptions,
    env: &EnvSnapshot,
) -> Result<RepoConfig> {
    repo_config::generate(associations, options, env)
}

/// Render a repo config as YAML, or as JSON when `json` is set
pub fn render(config: &RepoConfig, json: bool) -> Result<String> {
    if json {
        repo_config::render_json(config)
    } else {
        repo_config::render_yaml(config)
    }
}
