//! Error types for mediagen

use thiserror::Error;

/// The main error type for mediagen operations
#[derive(Debug, Error)]
pub enum MediagenError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Remote invocation failed: {0}")]
    RemoteInvocation(String),

    #[error("Unrecognized output shape: {0}")]
    UnrecognizedOutputShape(String),

    #[error("Invalid image reference: {0}")]
    InvalidImageReference(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Merge tool unavailable: {0}")]
    MergeToolUnavailable(String),

    #[error("Merge failed: {0}")]
    Merge(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for mediagen operations
pub type Result<T> = std::result::Result<T, MediagenError>;

impl MediagenError {
    /// True for errors caused by bad client input rather than the pipeline
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MediagenError::Validation(_) | MediagenError::InvalidImageReference(_)
        )
    }
}
