use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedError {
    #[error("invalid cron expression '{expr}': {reason}")]
    InvalidExpression { expr: String, reason: String },
    #[error("cron schedule '{0}' has no upcoming occurrences")]
    NoUpcoming(String),
}
