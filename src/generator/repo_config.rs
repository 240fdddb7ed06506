use crate::config::types::GenerationOptions;
use crate::discovery::Association;
use crate::error::Result;
use crate::generator::multienv::EnvSnapshot;
use crate::generator::schema::{RepoConfig, REPO_CONFIG_VERSION};
use crate::generator::{project_gen, workflow_gen};
use std::collections::BTreeMap;

/// Aggregates every association into one repo config.
///
/// Projects keep discovery order. Workflows are keyed by name, so when two
/// associations produce the same name the later one wins while both
/// projects are kept. Any invalid project fails the whole run.
pub fn generate(
    associations: &[Association],
    options: &GenerationOptions,
    env: &EnvSnapshot,
) -> Result<RepoConfig> {
    let mut projects = Vec::with_capacity(associations.len());
    let mut workflows = BTreeMap::new();

    for association in associations {
        let workflow = workflow_gen::generate(association, options, env);
        let project = project_gen::generate(association, options, Some(workflow.name.as_str()))?;
        projects.push(project);

        if let Some(replaced) = workflows.insert(workflow.name.clone(), workflow) {
            log::debug!(
                "Workflow {} generated more than once, keeping the one for {}",
                replaced.name,
                association.variable_file
            );
        }
    }

    log::info!(
        "Generated {} project(s) and {} workflow(s)",
        projects.len(),
        workflows.len()
    );

    Ok(RepoConfig {
        version: REPO_CONFIG_VERSION,
        automerge: options.automerge,
        parallel_plan: options.parallel,
        parallel_apply: options.parallel,
        projects,
        workflows,
    })
}

/// Renders the repo config as YAML
pub fn render_yaml(config: &RepoConfig) -> Result<String> {
    Ok(serde_yaml::to_string(config)?)
}

/// Renders the repo config as pretty-printed JSON
pub fn render_json(config: &RepoConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::schema::{Step, StepKind};
    use proptest::prelude::*;

    #[test]
    fn test_generate_with_nested_vars() {
        let associations = vec![
            Association::new("test", "test/vars/dev.tfvars"),
            Association::new("test", "test/vars/nested/stg.tfvars"),
        ];
        let config = generate(&associations, &GenerationOptions::default(), &EnvSnapshot::default()).unwrap();

        assert_eq!(config.version, 3);
        assert!(!config.automerge);
        assert!(!config.parallel_plan);
        assert!(!config.parallel_apply);

        let names: Vec<_> = config.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["test-dev", "test-stg"]);
        assert!(config.projects.iter().all(|p| p.dir == "test"));
        assert_eq!(config.projects[1].workflow.as_deref(), Some("test-stg"));

        let stg = &config.workflows["test-stg"];
        let mut extra_args = BTreeMap::new();
        extra_args.insert(
            "extra_args".to_string(),
            vec!["-var-file=vars/nested/stg.tfvars".to_string()],
        );
        assert_eq!(
            stg.plan.steps[1],
            Step::RunWithArgs {
                kind: StepKind::Plan,
                extra_args,
            }
        );
    }

    #[test]
    fn test_parallel_drives_plan_and_apply() {
        let options = GenerationOptions {
            automerge: true,
            parallel: true,
            ..Default::default()
        };
        let config = generate(&[], &options, &EnvSnapshot::default()).unwrap();

        assert!(config.automerge);
        assert!(config.parallel_plan);
        assert!(config.parallel_apply);
        assert!(config.projects.is_empty());
        assert!(config.workflows.is_empty());
    }

    #[test]
    fn test_duplicate_workflow_names_collapse_to_last() {
        // Both var files normalize to "app-dev"
        let associations = vec![
            Association::new("app", "app/dev.tfvars"),
            Association::new("app", "app/overrides/dev.tfvars"),
        ];
        let config = generate(&associations, &GenerationOptions::default(), &EnvSnapshot::default()).unwrap();

        assert_eq!(config.projects.len(), 2);
        assert_eq!(config.workflows.len(), 1);

        let workflow = &config.workflows["app-dev"];
        let mut extra_args = BTreeMap::new();
        extra_args.insert(
            "extra_args".to_string(),
            vec!["-var-file=overrides/dev.tfvars".to_string()],
        );
        assert_eq!(
            workflow.plan.steps[1],
            Step::RunWithArgs {
                kind: StepKind::Plan,
                extra_args,
            }
        );
    }

    #[test]
    fn test_invalid_project_aborts_generation() {
        let associations = vec![
            Association::new("ok", "ok/dev.tfvars"),
            Association::new("not ok", "not ok/dev.tfvars"),
        ];
        assert!(generate(&associations, &GenerationOptions::default(), &EnvSnapshot::default()).is_err());
    }

    #[test]
    fn test_render_yaml_key_order() {
        let associations = vec![Association::new("vpc", "vpc/dev.tfvars")];
        let options = GenerationOptions {
            autoplan: true,
            default_terraform_version: "invalid".to_string(),
            use_workspaces: true,
            ..Default::default()
        };
        let config = generate(&associations, &options, &EnvSnapshot::default()).unwrap();
        let yaml = render_yaml(&config).unwrap();

        let expected = r#"version: 3
automerge: false
parallel_plan: false
parallel_apply: false
projects:
- name: vpc-dev
  dir: vpc
  workspace: dev
  terraform_version: ''
  autoplan:
    when_modified:
    - '*.tf'
    - dev.tfvars
    enabled: true
  workflow: vpc-dev
workflows:
  vpc-dev:
    plan:
      steps:
      - init
      - plan:
          extra_args:
          - -var-file=dev.tfvars
    apply:
      steps:
      - apply
"#;
        assert_eq!(yaml, expected);
    }

    #[test]
    fn test_render_json() {
        let config = generate(
            &[Association::new(".", "dev.tfvars")],
            &GenerationOptions::default(),
            &EnvSnapshot::default(),
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&render_json(&config).unwrap()).unwrap();

        assert_eq!(json["version"], 3);
        assert_eq!(json["projects"][0]["name"], "dev");
        assert_eq!(json["projects"][0]["dir"], ".");
        assert_eq!(json["workflows"]["dev"]["apply"]["steps"][0], "apply");
    }

    proptest! {
        #[test]
        fn prop_workflow_collisions_keep_last(
            dirs in prop::collection::vec("[a-z]{1,6}", 1..6)
        ) {
            // Every association shares the component, so every name is "app-dev"
            let associations: Vec<_> = dirs
                .iter()
                .map(|dir| Association::new("app", format!("app/{}/dev.tfvars", dir)))
                .collect();
            let config = generate(&associations, &GenerationOptions::default(), &EnvSnapshot::default()).unwrap();

            prop_assert_eq!(config.projects.len(), associations.len());
            prop_assert_eq!(config.workflows.len(), 1);

            let last = associations.last().unwrap();
            let expected = format!("-var-file={}", last.variable_file_in_component());
            match &config.workflows["app-dev"].plan.steps[1] {
                Step::RunWithArgs { extra_args, .. } => {
                    prop_assert_eq!(&extra_args["extra_args"], &vec![expected]);
                }
                other => prop_assert!(false, "unexpected step {:?}", other),
            }
        }
    }
}
