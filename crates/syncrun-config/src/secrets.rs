use std::path::Path;

use tracing::{debug, warn};
use uuid::Uuid;

use syncrun_model::{RunContext, RunEnv};

use crate::ConfigError;

/// Secret variables forwarded verbatim into the child environment.
pub const SECRET_VARS: [&str; 5] = [
    "GITHUB_TOKEN",
    "GH_PAT",
    "SOURCE_PARAMS",
    "SERVICE_ACCOUNT_KEY",
    "SLACK_TOKEN",
];

/// Gather secrets from the ambient store.
///
/// Under CI the ref name is set and secrets live in the process
/// environment. Locally they are files under `secrets/`, one per
/// variable, named after the lowercased variable (`secrets/slack_token`).
/// Values are opaque to this layer; missing entries are skipped with a
/// warning rather than failing the run, since not every job needs every
/// secret.
pub fn resolve_secrets(
    lookup: impl Fn(&str) -> Option<String>,
    secrets_dir: impl AsRef<Path>,
) -> Result<RunEnv, ConfigError> {
    let mut env = RunEnv::new();
    let under_ci = lookup("GITHUB_REF_NAME").is_some();

    for name in SECRET_VARS {
        let value = if under_ci {
            lookup(name)
        } else {
            read_secret_file(secrets_dir.as_ref(), name)?
        };

        match value {
            Some(v) => {
                debug!(secret = name, "secret resolved");
                env.push(name, v);
            }
            None => warn!(secret = name, "secret not found; not forwarding"),
        }
    }

    Ok(env)
}

/// The execution identifier for this run.
///
/// Under CI the host platform provides `RUN_URL`; locally a synthetic
/// identifier is generated so the external program always sees one.
pub fn resolve_run_url(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("RUN_URL").unwrap_or_else(|| format!("local:{}", Uuid::new_v4()))
}

/// Assemble the full [`RunContext`] from the ambient store.
pub fn build_run_context(
    lookup: impl Fn(&str) -> Option<String>,
    secrets_dir: impl AsRef<Path>,
) -> Result<RunContext, ConfigError> {
    let secrets = resolve_secrets(&lookup, secrets_dir)?;
    let run_url = resolve_run_url(&lookup);
    Ok(RunContext::new(run_url, secrets))
}

fn read_secret_file(dir: &Path, name: &str) -> Result<Option<String>, ConfigError> {
    let path = dir.join(name.to_ascii_lowercase());
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(Some(raw.trim_end_matches('\n').to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn ci_mode_reads_from_env() {
        let lookup = env_of(&[
            ("GITHUB_REF_NAME", "main"),
            ("SLACK_TOKEN", "xoxb-ci"),
            ("GH_PAT", "ghp_ci"),
        ]);
        let env = resolve_secrets(lookup, "/nonexistent").unwrap();
        assert_eq!(env.get("SLACK_TOKEN"), Some("xoxb-ci"));
        assert_eq!(env.get("GH_PAT"), Some("ghp_ci"));
        assert_eq!(env.get("SERVICE_ACCOUNT_KEY"), None);
    }

    #[test]
    fn local_mode_reads_secret_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("slack_token"), "xoxb-local\n").unwrap();
        std::fs::write(dir.path().join("service_account_key"), "{\"k\":1}").unwrap();

        let env = resolve_secrets(|_| None, dir.path()).unwrap();
        assert_eq!(env.get("SLACK_TOKEN"), Some("xoxb-local"));
        assert_eq!(env.get("SERVICE_ACCOUNT_KEY"), Some("{\"k\":1}"));
        assert_eq!(env.get("GITHUB_TOKEN"), None);
    }

    #[test]
    fn run_url_passthrough() {
        let lookup = env_of(&[("RUN_URL", "https://ci.example/runs/7")]);
        assert_eq!(resolve_run_url(lookup), "https://ci.example/runs/7");
    }

    #[test]
    fn run_url_synthesized_locally() {
        let url = resolve_run_url(|_| None);
        assert!(url.starts_with("local:"));
    }

    #[test]
    fn context_combines_secrets_and_url() {
        let lookup = env_of(&[
            ("GITHUB_REF_NAME", "main"),
            ("RUN_URL", "https://ci.example/runs/9"),
            ("GITHUB_TOKEN", "t0"),
        ]);
        let ctx = build_run_context(lookup, "/nonexistent").unwrap();
        assert_eq!(ctx.run_url, "https://ci.example/runs/9");
        assert_eq!(ctx.secrets.get("GITHUB_TOKEN"), Some("t0"));
    }
}
