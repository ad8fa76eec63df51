use std::path::Path;

use serde::{Deserialize, Serialize};

use syncrun_model::JobSpec;

use crate::ConfigError;

/// A job declaration from the params file: what to launch, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobEntry {
    #[serde(flatten)]
    pub spec: JobSpec,
    /// Cron expression; jobs without one only run on manual dispatch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

/// Parsed `params.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    pub jobs: Vec<JobEntry>,
    /// Channel the failure notification is posted to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_channel_id: Option<String>,
}

impl Params {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let params: Params = serde_yaml::from_str(raw)?;
        if params.jobs.is_empty() {
            return Err(ConfigError::NoJobs);
        }
        Ok(params)
    }

    /// Find a job by name.
    pub fn job(&self, name: &str) -> Result<&JobEntry, ConfigError> {
        self.jobs
            .iter()
            .find(|j| j.spec.name == name)
            .ok_or_else(|| ConfigError::UnknownJob(name.to_string()))
    }

    /// The job a bare `run` dispatch targets: the first declared one.
    pub fn default_job(&self) -> &JobEntry {
        &self.jobs[0]
    }
}
