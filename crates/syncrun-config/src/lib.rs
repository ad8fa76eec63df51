mod error;
pub use error::ConfigError;

mod params;
pub use params::{JobEntry, Params};

mod environment;
pub use environment::Environment;

mod secrets;
pub use secrets::{SECRET_VARS, build_run_context, resolve_run_url, resolve_secrets};
