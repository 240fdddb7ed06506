use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generation: GenerationOptions,
    pub discovery: DiscoveryConfig,
}

/// Options controlling how projects and workflows are generated.
///
/// Supplied once per run and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub automerge: bool,
    pub autoplan: bool,
    /// Terraform version pinned on every project. Empty means unset.
    pub default_terraform_version: String,
    pub multi_env: bool,
    /// Drives both `parallel_plan` and `parallel_apply`.
    pub parallel: bool,
    pub use_workspaces: bool,
}

/// File name suffixes and directories recognised while walking the tree
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub definition_extension: String,
    pub variable_extensions: Vec<String>,
    pub ignore_dirs: Vec<String>,
}

impl DiscoveryConfig {
    pub fn is_definition_file(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.definition_extension)
    }

    pub fn is_variable_file(&self, file_name: &str) -> bool {
        self.variable_extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
    }

    pub fn is_ignored_dir(&self, dir_name: &str) -> bool {
        self.ignore_dirs.iter().any(|ignored| ignored == dir_name)
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            definition_extension: ".tf".to_string(),
            variable_extensions: vec![".tfvars".to_string(), ".tfvars.json".to_string()],
            ignore_dirs: vec![".git".to_string(), ".terraform".to_string()],
        }
    }
}
