//! Per-environment variable export for Atlantis `multienv` steps.
//!
//! Given a workspace such as `dev`, every variable named `DEV_<NAME>` is
//! exported as `<NAME>`:
//!
//! ```text
//! DEV_AWS_ACCESS_KEY_ID=foo
//! DEV_AWS_SECRET_ACCESS_KEY=bar
//! ->
//! AWS_ACCESS_KEY_ID=foo,AWS_SECRET_ACCESS_KEY=bar
//! ```

use std::collections::BTreeMap;

/// Environment variable Atlantis sets to the workspace being run
pub const WORKSPACE_ENV_VAR: &str = "WORKSPACE";

/// A point-in-time copy of environment variables, sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Captures the current process environment. Entries that are not
    /// valid unicode are dropped.
    pub fn capture() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A variable matched by a prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedVar<'a> {
    /// Name with the prefix removed
    pub name: &'a str,
    /// Original, prefixed name
    pub source: &'a str,
    pub value: &'a str,
}

/// Uppercases `prefix` and makes sure it ends with `_`
pub fn normalize_prefix(prefix: &str) -> String {
    let mut normalized = prefix.to_uppercase();
    if !normalized.ends_with('_') {
        normalized.push('_');
    }
    normalized
}

/// Every variable of `env` whose name starts with the normalized `prefix`
pub fn prefixed_vars<'a>(prefix: &str, env: &'a EnvSnapshot) -> Vec<StrippedVar<'a>> {
    let prefix = normalize_prefix(prefix);
    env.iter()
        .filter_map(|(source, value)| {
            source.strip_prefix(prefix.as_str()).map(|name| StrippedVar {
                name,
                source,
                value,
            })
        })
        .collect()
}

/// Joins `NAME=value` pairs for every prefixed variable with `,`.
///
/// Returns `None` when nothing matches, which callers treat as a
/// non-fatal "nothing to export".
pub fn strip_prefixed(prefix: &str, env: &EnvSnapshot) -> Option<String> {
    let vars = prefixed_vars(prefix, env);
    if vars.is_empty() {
        return None;
    }

    Some(
        vars.iter()
            .map(|var| format!("{}={}", var.name, var.value))
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Shell command for a workflow `multienv` step.
///
/// Pairs reference the prefixed variable (`NAME=$DEV_NAME`) rather than
/// its value, so secrets are resolved on the Atlantis host at run time.
pub fn multienv_command(prefix: &str, env: &EnvSnapshot) -> Option<String> {
    let vars = prefixed_vars(prefix, env);
    if vars.is_empty() {
        return None;
    }

    let pairs = vars
        .iter()
        .map(|var| format!("{}=${}", var.name, var.source))
        .collect::<Vec<_>>()
        .join(",");
    Some(format!("echo {}", pairs))
}
