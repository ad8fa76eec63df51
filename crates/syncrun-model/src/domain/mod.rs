mod kv;
pub use kv::KeyValue;

mod run_env;
pub use run_env::RunEnv;

mod run_config;
pub use run_config::{DispatchInputs, MaxWorkers, RunConfiguration, TimeoutMins, TriggerMode};

mod run_context;
pub use run_context::RunContext;

mod job_spec;
pub use job_spec::JobSpec;

mod trigger;
pub use trigger::Trigger;

mod outcome;
pub use outcome::RunOutcome;
