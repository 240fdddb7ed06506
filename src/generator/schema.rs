//! Atlantis repo-level configuration model.
//!
//! Field declaration order is the serialized key order.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Repo config schema version understood by Atlantis
pub const REPO_CONFIG_VERSION: u32 = 3;

/// The aggregated `atlantis.yaml` document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoConfig {
    pub version: u32,
    pub automerge: bool,
    pub parallel_plan: bool,
    pub parallel_apply: bool,
    /// Discovery order, duplicates allowed
    pub projects: Vec<Project>,
    /// Keyed by workflow name; a later workflow replaces an earlier one
    pub workflows: BTreeMap<String, Workflow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Project {
    pub name: String,
    pub dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,
    /// `Some("")` marks a requested but unparseable version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terraform_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoplan: Option<Autoplan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Autoplan {
    /// Patterns relative to the project directory
    pub when_modified: Vec<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workflow {
    #[serde(skip)]
    pub name: String,
    pub plan: Stage,
    pub apply: Stage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Init,
    Plan,
    Apply,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Init => "init",
            StepKind::Plan => "plan",
            StepKind::Apply => "apply",
        }
    }
}

/// One step of a workflow stage.
///
/// Serializes the way Atlantis reads steps: `- init`,
/// `- plan: {extra_args: [...]}`, `- multienv: <command>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    RunBuiltin(StepKind),
    RunWithArgs {
        kind: StepKind,
        extra_args: BTreeMap<String, Vec<String>>,
    },
    MultiEnv {
        command: String,
    },
}

impl Serialize for Step {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Step::RunBuiltin(kind) => serializer.serialize_str(kind.as_str()),
            Step::RunWithArgs { kind, extra_args } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(kind.as_str(), extra_args)?;
                map.end()
            }
            Step::MultiEnv { command } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("multienv", command)?;
                map.end()
            }
        }
    }
}
