use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use syncrun_model::{JobSpec, Trigger};

use crate::schedule::JobSchedule;

/// One unit of work handed to the runner.
///
/// Activations are produced by the schedule loops and consumed
/// sequentially; each one is an independent, isolated execution.
#[derive(Debug, Clone)]
pub struct Activation {
    pub job: JobSpec,
    pub trigger: Trigger,
}

impl Activation {
    pub fn scheduled(job: JobSpec, expression: impl Into<String>) -> Self {
        Self {
            job,
            trigger: Trigger::Scheduled {
                expression: expression.into(),
            },
        }
    }
}

/// Spawn the schedule loop for one job.
///
/// Sleeps until the next cron occurrence, emits an [`Activation`], and
/// repeats until cancelled or the receiver is dropped. Ticks that land
/// while the consumer is busy queue up in the channel; the consumer
/// still executes them one at a time.
pub fn spawn_schedule(
    job: JobSpec,
    schedule: JobSchedule,
    tx: mpsc::Sender<Activation>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let delay = match schedule.delay_from(Utc::now()) {
                Ok(delay) => delay,
                Err(e) => {
                    warn!(job = %job.name, error = %e, "schedule loop stopping");
                    return;
                }
            };
            debug!(job = %job.name, delay_secs = delay.as_secs(), "sleeping until next occurrence");

            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    info!(job = %job.name, expression = schedule.expression(), "schedule fired");
                    let activation = Activation::scheduled(job.clone(), schedule.expression());
                    if tx.send(activation).await.is_err() {
                        // receiver dropped; stop the loop
                        return;
                    }
                }
                _ = cancel.cancelled() => {
                    debug!(job = %job.name, "schedule loop cancelled");
                    return;
                }
            }
        }
    })
}
