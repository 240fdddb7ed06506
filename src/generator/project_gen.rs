use crate::common::version::normalize_semver;
use crate::config::types::GenerationOptions;
use crate::discovery::Association;
use crate::error::{GeneratorError, Result};
use crate::generator::naming::{base_name, friendly_name, stem_of};
use crate::generator::schema::{Autoplan, Project};

/// Pattern matching any Terraform definition file in a project directory
pub const DEFINITION_FILE_PATTERN: &str = "*.tf";

/// Builds and validates the Atlantis project for one association.
///
/// `workflow` names the workflow generated alongside the project.
pub fn generate(
    association: &Association,
    options: &GenerationOptions,
    workflow: Option<&str>,
) -> Result<Project> {
    let mut project = Project {
        name: friendly_name(&association.component_path, &association.variable_file),
        dir: association.component_path.clone(),
        ..Default::default()
    };

    if options.use_workspaces {
        // dev.tfvars -> dev
        project.workspace = Some(stem_of(base_name(&association.variable_file)));
    }

    if !options.default_terraform_version.is_empty() {
        project.terraform_version = Some(terraform_version(&options.default_terraform_version));
    }

    if options.autoplan {
        project.autoplan = Some(autoplan(&association.variable_file));
    }

    project.workflow = workflow.map(str::to_string);

    validate(&project).map_err(|reason| GeneratorError::InvalidProject {
        component: association.component_path.clone(),
        variable_file: association.variable_file.clone(),
        reason,
    })?;

    log::debug!("Generated project {} for {}", project.name, association.variable_file);
    Ok(project)
}

/// Canonical form of `requested`, or an empty string when it does not parse
pub fn terraform_version(requested: &str) -> String {
    match normalize_semver(requested) {
        Some(version) => version,
        None => {
            log::warn!(
                "Default Terraform version '{}' is not a valid version, leaving it empty",
                requested
            );
            String::new()
        }
    }
}

/// Plans whenever a definition file or this variable file changes
pub fn autoplan(variable_file: &str) -> Autoplan {
    Autoplan {
        when_modified: vec![
            DEFINITION_FILE_PATTERN.to_string(),
            base_name(variable_file).to_string(),
        ],
        enabled: true,
    }
}

/// Checks a project against the constraints Atlantis puts on repo config
pub fn validate(project: &Project) -> std::result::Result<(), String> {
    if project.dir.is_empty() {
        return Err("dir cannot be empty".to_string());
    }
    if project.dir.contains("..") {
        return Err(format!("dir '{}' cannot contain '..'", project.dir));
    }

    if project.name.is_empty() {
        return Err("name cannot be empty".to_string());
    }
    if !is_url_safe(&project.name) {
        return Err(format!(
            "name '{}' is not allowed: must contain only URL safe characters",
            project.name
        ));
    }

    if let Some(workspace) = &project.workspace {
        if workspace.is_empty() {
            return Err("workspace cannot be empty when set".to_string());
        }
    }

    if let Some(version) = &project.terraform_version {
        if !version.is_empty() && normalize_semver(version).is_none() {
            return Err(format!("terraform_version '{}' could not be parsed", version));
        }
    }

    if let Some(workflow) = &project.workflow {
        if workflow != &project.name {
            return Err(format!(
                "workflow '{}' does not match a generated workflow",
                workflow
            ));
        }
    }

    Ok(())
}

fn is_url_safe(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | '/'))
}
