use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The external program a job launches.
///
/// Two variants exist in practice: the parameterized one receives the
/// resolved run configuration as command-line flags, the flagless one
/// only receives it through environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    /// Job name, used for dispatch lookup and in notifications.
    pub name: String,
    /// Program to execute (e.g. `"python"`).
    pub program: String,
    /// Leading arguments (e.g. `["-m", "src.andhra_pradesh_mlhp"]`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    /// Whether the resolved configuration is appended as
    /// `--timeout-mins`/`--trigger-mode`/`--max-workers` flags.
    #[serde(default)]
    pub pass_run_flags: bool,
    /// Working directory.
    ///
    /// If `None`, the child inherits the agent's working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl JobSpec {
    pub fn new(name: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
            pass_run_flags: false,
            cwd: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_run_flags(mut self) -> Self {
        self.pass_run_flags = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let spec = JobSpec::new("mlhp", "python")
            .with_args(["-m", "src.andhra_pradesh_mlhp"])
            .with_run_flags();

        assert_eq!(spec.name, "mlhp");
        assert_eq!(spec.program, "python");
        assert_eq!(spec.args, vec!["-m", "src.andhra_pradesh_mlhp"]);
        assert!(spec.pass_run_flags);
        assert!(spec.cwd.is_none());
    }

    #[test]
    fn serde_defaults_for_optional_fields() {
        let spec: JobSpec =
            serde_json::from_str(r#"{"name":"ccp","program":"python"}"#).unwrap();
        assert!(!spec.pass_run_flags);
        assert!(spec.args.is_empty());
        assert!(spec.cwd.is_none());
    }
}
