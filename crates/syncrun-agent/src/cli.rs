use std::path::PathBuf;

use clap::{Parser, Subcommand};

use syncrun_model::{DispatchInputs, MaxWorkers, TimeoutMins, TriggerMode};

#[derive(Parser)]
#[command(name = "syncrun-agent")]
#[command(about = "Trigger and run external sync jobs on a schedule or on demand")]
pub struct Cli {
    /// Path to the params file
    #[arg(long, default_value = "params.yaml", global = true)]
    pub params: PathBuf,

    /// Directory holding local-development secret files
    #[arg(long, default_value = "secrets", global = true)]
    pub secrets_dir: PathBuf,

    /// Log format (text|json|journald)
    #[arg(long, default_value = "text", global = true)]
    pub log_format: String,

    /// Log level filter
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Dispatch one job now and exit with its outcome
    Run {
        /// Job name from the params file; defaults to the first declared job
        #[arg(long)]
        job: Option<String>,
        /// Run timeout in minutes (5|20|60|240)
        #[arg(long)]
        timeout_mins: Option<TimeoutMins>,
        /// Continuation hint for the external program
        /// (oneanddone|oneormore|continuing)
        #[arg(long)]
        trigger_mode: Option<TriggerMode>,
        /// Worker count forwarded to the external program (1|2|4)
        #[arg(long)]
        max_workers: Option<MaxWorkers>,
    },
    /// Run the cron loops for all scheduled jobs until interrupted
    Schedule,
}

impl Commands {
    /// The dispatch overrides carried by this invocation.
    pub fn dispatch_inputs(&self) -> DispatchInputs {
        match self {
            Commands::Run {
                timeout_mins,
                trigger_mode,
                max_workers,
                ..
            } => DispatchInputs {
                timeout_mins: *timeout_mins,
                trigger_mode: *trigger_mode,
                max_workers: *max_workers,
            },
            Commands::Schedule => DispatchInputs::default(),
        }
    }
}
