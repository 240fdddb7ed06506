use crate::config::types::GenerationOptions;
use crate::discovery::Association;
use crate::generator::multienv::{self, EnvSnapshot};
use crate::generator::naming::{base_name, friendly_name, stem_of};
use crate::generator::schema::{Stage, Step, StepKind, Workflow};
use std::collections::BTreeMap;

/// Builds the plan/apply workflow for one association.
///
/// The plan step passes the variable file relative to the project
/// directory. With multienv enabled, both stages first export the
/// variables prefixed with the environment name, when there are any.
pub fn generate(
    association: &Association,
    options: &GenerationOptions,
    env: &EnvSnapshot,
) -> Workflow {
    let name = friendly_name(&association.component_path, &association.variable_file);

    let mut extra_args = BTreeMap::new();
    extra_args.insert(
        "extra_args".to_string(),
        vec![format!(
            "-var-file={}",
            association.variable_file_in_component()
        )],
    );

    let mut plan = Stage {
        steps: vec![
            Step::RunBuiltin(StepKind::Init),
            Step::RunWithArgs {
                kind: StepKind::Plan,
                extra_args,
            },
        ],
    };
    let mut apply = Stage {
        steps: vec![Step::RunBuiltin(StepKind::Apply)],
    };

    if options.multi_env {
        let environment = stem_of(base_name(&association.variable_file));
        match multienv::multienv_command(&environment, env) {
            Some(command) => {
                plan.steps.insert(0, Step::MultiEnv { command: command.clone() });
                apply.steps.insert(0, Step::MultiEnv { command });
            }
            None => log::debug!(
                "No environment variables prefixed with {} for workflow {}",
                multienv::normalize_prefix(&environment),
                name
            ),
        }
    }

    Workflow { name, plan, apply }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_step(var_file: &str) -> Step {
        let mut extra_args = BTreeMap::new();
        extra_args.insert("extra_args".to_string(), vec![format!("-var-file={}", var_file)]);
        Step::RunWithArgs {
            kind: StepKind::Plan,
            extra_args,
        }
    }

    #[test]
    fn test_generate_workflow() {
        let association = Association::new("test", "test/vars/dev.tfvars");
        let workflow = generate(&association, &GenerationOptions::default(), &EnvSnapshot::default());

        assert_eq!(
            workflow,
            Workflow {
                name: "test-dev".to_string(),
                plan: Stage {
                    steps: vec![Step::RunBuiltin(StepKind::Init), plan_step("vars/dev.tfvars")],
                },
                apply: Stage {
                    steps: vec![Step::RunBuiltin(StepKind::Apply)],
                },
            }
        );
    }

    #[test]
    fn test_generate_workflow_at_root() {
        let association = Association::new(".", "stg.tfvars");
        let workflow = generate(&association, &GenerationOptions::default(), &EnvSnapshot::default());

        assert_eq!(workflow.name, "stg");
        assert_eq!(workflow.plan.steps[1], plan_step("stg.tfvars"));
    }

    #[test]
    fn test_multienv_step_injected() {
        let options = GenerationOptions {
            multi_env: true,
            ..Default::default()
        };
        let env: EnvSnapshot = [("DEV_AWS_REGION", "eu-west-1")].into_iter().collect();
        let workflow = generate(&Association::new("vpc", "vpc/dev.tfvars"), &options, &env);

        let expected = Step::MultiEnv {
            command: "echo AWS_REGION=$DEV_AWS_REGION".to_string(),
        };
        assert_eq!(workflow.plan.steps.len(), 3);
        assert_eq!(workflow.plan.steps[0], expected);
        assert_eq!(workflow.apply.steps, vec![expected, Step::RunBuiltin(StepKind::Apply)]);
    }

    #[test]
    fn test_multienv_without_matches_is_skipped() {
        let options = GenerationOptions {
            multi_env: true,
            ..Default::default()
        };
        let env: EnvSnapshot = [("PROD_AWS_REGION", "eu-west-1")].into_iter().collect();
        let workflow = generate(&Association::new("vpc", "vpc/dev.tfvars"), &options, &env);

        assert_eq!(workflow.plan.steps.len(), 2);
        assert_eq!(workflow.apply.steps.len(), 1);
    }
}
