use thiserror::Error;

use tranq_core::TranqError;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    Core(#[from] TranqError),

    #[error("Corrupted reads need an architecture with at least two segments, found {0}")]
    TooFewSegments(usize),

    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("Can't build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Can't read config file {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },

    #[error("Can't parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Can't serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
