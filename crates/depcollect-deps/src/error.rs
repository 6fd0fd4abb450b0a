use std::path::PathBuf;
use thiserror::Error;

/// Result type for dependency collection
pub type Result<T> = std::result::Result<T, DepsError>;

/// Errors that stop a collection pass
///
/// Both variants carry the path that caused the failure so the caller
/// can tell the user exactly where to look.
#[derive(Error, Debug)]
pub enum DepsError {
    #[error("Root folder not found or not a directory: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DepsError {
    /// Path that triggered the error
    pub fn path(&self) -> &std::path::Path {
        match self {
            DepsError::NotFound { path } => path,
            DepsError::ReadError { path, .. } => path,
        }
    }
}
