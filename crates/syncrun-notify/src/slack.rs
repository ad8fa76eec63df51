use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::NotifyError;

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// Text posted when a prod run fails.
///
/// Carries the job name, the failure reason, and a link to the run so an
/// operator can jump straight to the log.
pub fn failure_text(job: &str, reason: &str, run_url: &str) -> String {
    let mut text = format!(":warning: Sync for {job} failed with the following error:\n\n`{reason}`");
    if !run_url.is_empty() {
        text.push_str(&format!("\n\nPlease see the <{run_url}|run log>."));
    }
    text
}

#[derive(Debug, Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Posts failure notifications to a Slack channel.
pub struct SlackNotifier {
    client: reqwest::Client,
    token: String,
    channel_id: String,
}

impl SlackNotifier {
    pub fn new(token: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            channel_id: channel_id.into(),
        }
    }

    /// Send a failure message for a finished run.
    pub async fn notify_failure(
        &self,
        job: &str,
        reason: &str,
        run_url: &str,
    ) -> Result<(), NotifyError> {
        let text = failure_text(job, reason, run_url);
        let body = PostMessage {
            channel: &self.channel_id,
            text: &text,
        };

        let response = self
            .client
            .post(POST_MESSAGE_URL)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let parsed: PostMessageResponse = response.json().await?;
        if !parsed.ok {
            return Err(NotifyError::Rejected(
                parsed.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        debug!(job, channel = %self.channel_id, "failure notification posted");
        Ok(())
    }
}
