//! # Component Discovery
//!
//! Partitions a directory tree into Terraform components and attributes each
//! variable file to exactly one owning component.
//!
//! A component is a directory holding a definition file (`*.tf`). A variable
//! file belongs to the nearest enclosing component: its own directory if that
//! directory is a component, otherwise the closest ancestor that is. Variable
//! files under a nested component never leak to the outer one.
//!
//! ```text
//! .
//! └── components
//!     ├── component1
//!     │   ├── main.tf
//!     │   └── dev.tfvars
//!     └── component2
//!         ├── extraVars
//!         │   └── stg.tfvars
//!         ├── main.tf
//!         └── dev.tfvars
//! ```
//!
//! yields `components/component1 -> dev.tfvars` and
//! `components/component2 -> dev.tfvars, extraVars/stg.tfvars`.

use crate::common::file_utils;
use crate::config::types::DiscoveryConfig;
use crate::error::{DiscoveryError, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A (component, variable file) pair, the unit that yields one project and
/// one workflow.
///
/// Both paths are relative to the scan root and use `/` separators. The scan
/// root itself is `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    pub component_path: String,
    pub variable_file: String,
}

impl Association {
    pub fn new(component_path: impl Into<String>, variable_file: impl Into<String>) -> Self {
        Self {
            component_path: component_path.into(),
            variable_file: variable_file.into(),
        }
    }

    /// The variable file relative to the component directory
    pub fn variable_file_in_component(&self) -> &str {
        if self.component_path == "." {
            return &self.variable_file;
        }

        self.variable_file
            .strip_prefix(self.component_path.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(&self.variable_file)
    }
}

/// Walks `root` and returns every association in discovery order.
///
/// Any I/O error aborts the walk; no partial result is returned.
pub fn discover(root: &Path, config: &DiscoveryConfig) -> Result<Vec<Association>> {
    let root = file_utils::validate_project_path(root)?;
    log::info!("Discovering Terraform components under {}", root.display());

    let mut associations = Vec::new();
    let mut walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|source| walk_error(&root, source))?;

        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.depth() > 0 && is_ignored(&entry, config) {
            walker.skip_current_dir();
            continue;
        }

        if file_utils::dir_has_definition_file(entry.path(), config)? {
            discover_component(&root, entry.path(), config, &mut associations)?;
            // The component walk already covered this subtree
            walker.skip_current_dir();
        }
    }

    log::info!("Discovered {} variable file(s)", associations.len());
    Ok(associations)
}

/// Walks one component directory, appending the variable files it owns.
///
/// Nested component directories are pruned from this walk and then
/// discovered on their own once it completes.
fn discover_component(
    root: &Path,
    component_dir: &Path,
    config: &DiscoveryConfig,
    associations: &mut Vec<Association>,
) -> Result<()> {
    let component_path = file_utils::relative_path_string(root, component_dir);
    log::debug!("Found Terraform component: {}", component_path);

    let mut nested_components: Vec<PathBuf> = Vec::new();
    let mut walker = WalkDir::new(component_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|source| walk_error(component_dir, source))?;

        if entry.file_type().is_dir() {
            if entry.depth() == 0 {
                continue;
            }
            if is_ignored(&entry, config) {
                walker.skip_current_dir();
                continue;
            }
            if file_utils::dir_has_definition_file(entry.path(), config)? {
                log::debug!(
                    "Skipping nested component {} inside {}",
                    file_utils::relative_path_string(root, entry.path()),
                    component_path
                );
                nested_components.push(entry.path().to_path_buf());
                walker.skip_current_dir();
            }
            continue;
        }

        // Symlinked variable files count like regular ones
        let file_name = entry.file_name().to_string_lossy();
        if config.is_variable_file(&file_name) {
            let variable_file = file_utils::relative_path_string(root, entry.path());
            log::debug!("Component {} has var file {}", component_path, variable_file);
            associations.push(Association::new(component_path.clone(), variable_file));
        }
    }

    for nested in nested_components {
        discover_component(root, &nested, config, associations)?;
    }

    Ok(())
}

fn is_ignored(entry: &DirEntry, config: &DiscoveryConfig) -> bool {
    config.is_ignored_dir(&entry.file_name().to_string_lossy())
}

fn walk_error(fallback: &Path, source: walkdir::Error) -> DiscoveryError {
    let path = source
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf());
    DiscoveryError::Walk { path, source }
}
