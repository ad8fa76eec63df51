mod error;
pub use error::NotifyError;

mod slack;
pub use slack::{SlackNotifier, failure_text};
