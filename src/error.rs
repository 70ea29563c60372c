use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobkeeperError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Job template error: {0}")]
    Template(String),

    #[error("Kubernetes API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Kubernetes API call still failing after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<JobkeeperError>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, JobkeeperError>;
