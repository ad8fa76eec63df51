use serde::{Deserialize, Serialize};

/// Terminal result of a single run, as seen by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunOutcome {
    /// The external program exited zero.
    Succeeded,
    /// The external program exited non-zero.
    Failed { code: i32 },
    /// The external program was terminated by a signal.
    KilledBySignal,
    /// The run exceeded its configured timeout and was killed.
    TimedOut,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Succeeded)
    }

    /// Exit code the agent reports to the host platform.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Succeeded => 0,
            RunOutcome::Failed { code } => *code,
            RunOutcome::KilledBySignal | RunOutcome::TimedOut => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(RunOutcome::Succeeded.exit_code(), 0);
        assert_eq!(RunOutcome::Failed { code: 3 }.exit_code(), 3);
        assert_eq!(RunOutcome::TimedOut.exit_code(), 1);
        assert_eq!(RunOutcome::KilledBySignal.exit_code(), 1);
    }

    #[test]
    fn only_zero_exit_is_success() {
        assert!(RunOutcome::Succeeded.is_success());
        assert!(!RunOutcome::Failed { code: 1 }.is_success());
        assert!(!RunOutcome::TimedOut.is_success());
    }
}
