use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse params file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("no job named {0} in params file")]
    UnknownJob(String),
    #[error("params file declares no jobs")]
    NoJobs,
}
