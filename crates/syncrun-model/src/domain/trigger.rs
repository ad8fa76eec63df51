use crate::{DispatchInputs, RunConfiguration};

/// What caused an activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The cron schedule reached its next occurrence.
    Scheduled {
        /// The schedule expression that fired, for logging.
        expression: String,
    },
    /// An operator dispatched the job, possibly with overrides.
    Manual { inputs: DispatchInputs },
}

impl Trigger {
    /// Resolve the run configuration for this activation.
    ///
    /// A scheduled trigger carries no inputs and resolves to the
    /// documented defaults, identically to a no-input manual dispatch.
    pub fn resolve(&self) -> RunConfiguration {
        match self {
            Trigger::Scheduled { .. } => RunConfiguration::default(),
            Trigger::Manual { inputs } => RunConfiguration::resolve(inputs),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Trigger::Scheduled { .. } => "scheduled",
            Trigger::Manual { .. } => "manual",
        }
    }
}
