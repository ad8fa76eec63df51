mod agent;
mod cli;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use syncrun_config::Params;
use syncrun_observe::{LoggerConfig, LoggerFormat, init_logger};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger_cfg = LoggerConfig {
        format: cli.log_format.parse::<LoggerFormat>()?,
        level: cli.log_level.clone(),
        ..Default::default()
    };
    init_logger(&logger_cfg)?;

    let params = Params::load(&cli.params)?;

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received; shutting down");
            signal_cancel.cancel();
        }
    });

    match &cli.command {
        Commands::Run { job, .. } => {
            let inputs = cli.command.dispatch_inputs();
            let outcome = agent::run_once(
                &params,
                job.as_deref(),
                inputs,
                &cli.secrets_dir,
                cancel,
            )
            .await?;
            std::process::exit(outcome.exit_code());
        }
        Commands::Schedule => {
            agent::run_scheduler(&params, &cli.secrets_dir, cancel).await?;
        }
    }

    Ok(())
}
