use thiserror::Error;

/// All the ways a depcollect run can go wrong
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Collect(#[from] depcollect_deps::DepsError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Export failed: {0}")]
    ExportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
