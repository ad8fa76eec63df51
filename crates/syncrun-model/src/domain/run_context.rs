use serde::{Deserialize, Serialize};

use crate::RunEnv;

/// Run-identifying metadata and secrets handed to the external program.
///
/// Opaque to the trigger layer: values are forwarded into the child
/// process environment and never inspected or mutated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunContext {
    /// URL identifying this run in the host platform's UI.
    pub run_url: String,
    /// Secret material from the ambient secret store.
    pub secrets: RunEnv,
}

impl RunContext {
    pub fn new(run_url: impl Into<String>, secrets: RunEnv) -> Self {
        Self {
            run_url: run_url.into(),
            secrets,
        }
    }

    /// Full environment for the child: secrets plus the run URL.
    ///
    /// `RUN_URL` is appended last so a stray entry in the secret store
    /// cannot shadow the actual execution identifier.
    pub fn to_env(&self) -> RunEnv {
        let mut env = self.secrets.clone();
        env.push("RUN_URL", self.run_url.clone());
        env
    }
}
