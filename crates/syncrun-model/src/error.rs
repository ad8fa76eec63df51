use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid timeout: {0} (expected: 5|20|60|240)")]
    InvalidTimeout(String),
    #[error("invalid trigger mode: {0} (expected: oneanddone|oneormore|continuing)")]
    InvalidTriggerMode(String),
    #[error("invalid worker count: {0} (expected: 1|2|4)")]
    InvalidMaxWorkers(String),
}
