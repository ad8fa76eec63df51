mod error;
pub use error::SchedError;

mod schedule;
pub use schedule::{JobSchedule, normalize_cron_expression};

mod activation;
pub use activation::{Activation, spawn_schedule};
