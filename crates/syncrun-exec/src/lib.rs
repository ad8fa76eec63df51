mod error;
pub use error::{ExecError, ExecResult};

mod proc;
pub use proc::{argv, run_job, run_with_deadline};

mod util;
