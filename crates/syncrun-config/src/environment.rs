use serde::{Deserialize, Serialize};

/// Deployment environment, derived from the git ref the agent runs under.
///
/// Failure notifications are only sent from prod.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Prod,
    Dev,
}

impl Environment {
    /// The `main` ref is prod; anything else (including no ref at all,
    /// i.e. a local run) is dev.
    pub fn from_ref_name(ref_name: Option<&str>) -> Self {
        match ref_name {
            Some("main") => Environment::Prod,
            _ => Environment::Dev,
        }
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Environment::Prod)
    }
}
