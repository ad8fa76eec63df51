use std::path::Path;

use anyhow::Context;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use syncrun_config::{Environment, JobEntry, Params, build_run_context};
use syncrun_exec::run_job;
use syncrun_model::{DispatchInputs, RunConfiguration, RunOutcome, Trigger};
use syncrun_notify::SlackNotifier;
use syncrun_sched::{Activation, JobSchedule, spawn_schedule};

fn ambient(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Dispatch one job now.
pub async fn run_once(
    params: &Params,
    job_name: Option<&str>,
    inputs: DispatchInputs,
    secrets_dir: &Path,
    cancel: CancellationToken,
) -> anyhow::Result<RunOutcome> {
    let entry = match job_name {
        Some(name) => params.job(name)?,
        None => params.default_job(),
    };
    let trigger = Trigger::Manual { inputs };
    execute(params, entry, &trigger, secrets_dir, cancel).await
}

/// Run the cron loops for every scheduled job until interrupted.
///
/// Activations are consumed one at a time; `max_workers` is forwarded to
/// the external program, not parallelism in this loop.
pub async fn run_scheduler(
    params: &Params,
    secrets_dir: &Path,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel::<Activation>(16);
    let mut loops = Vec::new();

    for entry in &params.jobs {
        let Some(expr) = &entry.schedule else {
            info!(job = %entry.spec.name, "no schedule; manual dispatch only");
            continue;
        };
        let schedule: JobSchedule = expr
            .parse()
            .with_context(|| format!("schedule for job {}", entry.spec.name))?;
        info!(job = %entry.spec.name, expression = %expr, "schedule registered");
        loops.push(spawn_schedule(
            entry.spec.clone(),
            schedule,
            tx.clone(),
            cancel.clone(),
        ));
    }
    if loops.is_empty() {
        anyhow::bail!("no scheduled jobs in params file");
    }
    // the loops hold their own senders
    drop(tx);

    while let Some(activation) = rx.recv().await {
        let entry = params.job(&activation.job.name)?;
        if let Err(e) = execute(params, entry, &activation.trigger, secrets_dir, cancel.clone()).await
        {
            error!(job = %activation.job.name, error = %e, "activation failed in the runner");
        }
        if cancel.is_cancelled() {
            break;
        }
    }

    for handle in loops {
        let _ = handle.await;
    }
    Ok(())
}

/// Resolve, launch, and report one activation.
async fn execute(
    params: &Params,
    entry: &JobEntry,
    trigger: &Trigger,
    secrets_dir: &Path,
    cancel: CancellationToken,
) -> anyhow::Result<RunOutcome> {
    let cfg = trigger.resolve();
    let ctx = build_run_context(ambient, secrets_dir)?;
    info!(
        job = %entry.spec.name,
        trigger = trigger.kind(),
        timeout_mins = cfg.timeout.minutes(),
        trigger_mode = %cfg.trigger_mode,
        max_workers = %cfg.max_workers,
        run_url = %ctx.run_url,
        "starting run"
    );

    let outcome = run_job(&entry.spec, &cfg, &ctx, cancel).await?;

    match outcome {
        RunOutcome::Succeeded => info!(job = %entry.spec.name, "run succeeded"),
        _ => {
            let reason = failure_reason(&outcome, &cfg);
            warn!(job = %entry.spec.name, reason = %reason, "run failed");
            notify_failure(params, &entry.spec.name, &reason, &ctx.run_url).await;
        }
    }
    Ok(outcome)
}

/// Human-readable reason for a failed outcome.
fn failure_reason(outcome: &RunOutcome, cfg: &RunConfiguration) -> String {
    match outcome {
        RunOutcome::Succeeded => String::new(),
        RunOutcome::Failed { code } => format!("exit code: {code}"),
        RunOutcome::KilledBySignal => "terminated by signal".to_string(),
        RunOutcome::TimedOut => {
            format!("timed out after {} minutes", cfg.timeout.minutes())
        }
    }
}

/// Post the failure to Slack, prod only.
///
/// A notification failure is logged and swallowed: it must not mask the
/// run failure itself.
async fn notify_failure(params: &Params, job: &str, reason: &str, run_url: &str) {
    let environment = Environment::from_ref_name(ambient("GITHUB_REF_NAME").as_deref());
    if !environment.is_prod() {
        return;
    }
    let (Some(channel), Some(token)) = (&params.slack_channel_id, ambient("SLACK_TOKEN")) else {
        warn!("slack channel or token missing; skipping failure notification");
        return;
    };

    let notifier = SlackNotifier::new(token, channel);
    if let Err(e) = notifier.notify_failure(job, reason, run_url).await {
        error!(error = %e, "failed to post failure notification");
    }
}
