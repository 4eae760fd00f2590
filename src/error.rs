use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read configuration file")]
    FailedToRead,
    #[error("invalid toml: {0}")]
    InvalidToml(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to spawn worker thread")]
    SpawnWorker(#[source] std::io::Error),
    #[error("worker {0} panicked")]
    WorkerPanicked(String),
}
