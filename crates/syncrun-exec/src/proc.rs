use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use syncrun_model::{JobSpec, RunConfiguration, RunContext, RunOutcome};

use crate::error::{ExecError, ExecResult};
use crate::util::kill_graceful;

/// Full argument vector for a job, excluding the program itself.
///
/// The parameterized variant gets the resolved configuration appended as
/// flags; the flagless variant keeps its declared arguments untouched.
pub fn argv(spec: &JobSpec, cfg: &RunConfiguration) -> Vec<String> {
    let mut args = spec.args.clone();
    if spec.pass_run_flags {
        args.extend(cfg.to_args());
    }
    args
}

/// Launch the external program and wait for it to finish.
///
/// The timeout comes from the resolved configuration. Non-zero exit,
/// signal death and timeout are outcomes, not errors; errors are
/// reserved for the runner's own failures (spawn, wait, cancellation).
pub async fn run_job(
    spec: &JobSpec,
    cfg: &RunConfiguration,
    ctx: &RunContext,
    cancel: CancellationToken,
) -> ExecResult<RunOutcome> {
    let deadline = Duration::from_secs(cfg.timeout.minutes() * 60);
    run_with_deadline(spec, cfg, ctx, deadline, cancel).await
}

/// Same as [`run_job`] with an explicit deadline.
pub async fn run_with_deadline(
    spec: &JobSpec,
    cfg: &RunConfiguration,
    ctx: &RunContext,
    deadline: Duration,
    cancel: CancellationToken,
) -> ExecResult<RunOutcome> {
    let args = argv(spec, cfg);
    trace!(job = %spec.name, program = %spec.program, ?args, "spawn");

    let mut cmd = Command::new(&spec.program);
    cmd.args(&args);

    if let Some(cwd) = &spec.cwd {
        cmd.current_dir(cwd);
    }
    for kv in ctx.to_env().iter() {
        cmd.env(kv.key(), kv.value());
    }
    for (k, v) in cfg.to_env() {
        cmd.env(k, v);
    }

    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::inherit());
    cmd.kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|e| ExecError::Spawn(e.to_string()))?;

    let mut out_lines = {
        // stdout is piped above
        let stdout = child.stdout.take().ok_or_else(|| {
            ExecError::Spawn("child stdout was not captured".to_string())
        })?;
        BufReader::new(stdout).lines()
    };

    let job = spec.name.clone();
    let read_stdout = tokio::spawn(async move {
        while let Ok(Some(line)) = out_lines.next_line().await {
            info!(target: "syncrun.exec.out", job = %job, "{line}");
        }
    });

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(|e| ExecError::Wait(e.to_string()))?;
            // drain the tail of the output
            let _ = read_stdout.await;

            if status.success() {
                debug!(job = %spec.name, "exit success");
                return Ok(RunOutcome::Succeeded);
            }
            match status.code() {
                Some(code) => {
                    debug!(job = %spec.name, code, "exit non-zero");
                    Ok(RunOutcome::Failed { code })
                }
                None => {
                    debug!(job = %spec.name, "terminated by signal");
                    Ok(RunOutcome::KilledBySignal)
                }
            }
        }
        _ = tokio::time::sleep(deadline) => {
            warn!(job = %spec.name, timeout_mins = cfg.timeout.minutes(), "timeout hit; killing child");
            let _ = kill_graceful(&mut child).await;
            read_stdout.abort();
            Ok(RunOutcome::TimedOut)
        }
        _ = cancel.cancelled() => {
            debug!(job = %spec.name, "cancelled; killing child");
            let _ = kill_graceful(&mut child).await;
            read_stdout.abort();
            Err(ExecError::Cancelled)
        }
    }
}
