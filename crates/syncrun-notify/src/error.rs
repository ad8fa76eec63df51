use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("slack request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("slack rejected the message: {0}")]
    Rejected(String),
}
