use crate::config::types::DiscoveryConfig;
use crate::error::DiscoveryError;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Validates the scan root and returns its canonical form
pub fn validate_project_path(path: &Path) -> Result<PathBuf, DiscoveryError> {
    // Keep an existing path as given when it cannot be canonicalized
    let canonical = match path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            if path.exists() {
                path.to_path_buf()
            } else {
                return Err(DiscoveryError::InvalidRoot {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    };

    if !canonical.is_dir() {
        return Err(DiscoveryError::InvalidRoot {
            path: path.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    Ok(canonical)
}

/// Renders `target` relative to `root` with `/` separators.
///
/// The root itself renders as `.`.
pub fn relative_path_string(root: &Path, target: &Path) -> String {
    let relative = target.strip_prefix(root).unwrap_or(target);

    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Checks whether `dir` directly contains a definition file.
///
/// Anything that is not a directory counts, so symlinked definition files
/// shared between components are seen.
pub fn dir_has_definition_file(
    dir: &Path,
    config: &DiscoveryConfig,
) -> Result<bool, DiscoveryError> {
    let entries = fs::read_dir(dir).map_err(|source| DiscoveryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| DiscoveryError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let file_type = entry.file_type().map_err(|source| DiscoveryError::ReadDir {
            path: entry.path(),
            source,
        })?;

        if !file_type.is_dir() && config.is_definition_file(&entry.file_name().to_string_lossy())
        {
            return Ok(true);
        }
    }

    Ok(false)
}
