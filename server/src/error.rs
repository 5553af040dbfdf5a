use crate::vcs::VcsError;
use axum::http::StatusCode;
use thiserror::Error;

/// Request-level failures of the read and write pipelines.
///
/// Every variant maps to exactly one HTTP status through [`SyncError::status_code`];
/// the `Display` text is what callers see in the `error` field.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("File path must not be empty.")]
    EmptyPath,

    #[error("File path and content must not be empty.")]
    MissingContent,

    #[error("Access to path '{path}' is not allowed.")]
    OutsideSandbox { path: String },

    #[error("Unable to read file: {message}")]
    ReadFailed { message: String },

    #[error("The specified file or directory does not exist.")]
    NotFound,

    #[error("Git authentication failed, check the remote credentials.")]
    Authentication,

    #[error("Git sync failed: {stderr}")]
    VersionControl { stderr: String },

    #[error("Operation failed: {message}")]
    Internal { message: String },

    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },
}

pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SyncError::EmptyPath | SyncError::MissingContent | SyncError::InvalidBody { .. } => {
                StatusCode::BAD_REQUEST
            }
            SyncError::OutsideSandbox { .. } => StatusCode::FORBIDDEN,
            SyncError::ReadFailed { .. }
            | SyncError::NotFound
            | SyncError::Authentication
            | SyncError::VersionControl { .. }
            | SyncError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify a failed file write. Only a missing file or directory gets its
    /// own message; everything else is surfaced verbatim.
    pub fn from_write(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => SyncError::NotFound,
            _ => SyncError::Internal {
                message: error.to_string(),
            },
        }
    }
}

impl From<VcsError> for SyncError {
    fn from(error: VcsError) -> Self {
        match error {
            VcsError::Authentication { .. } => SyncError::Authentication,
            VcsError::Spawn { ref source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                SyncError::NotFound
            }
            VcsError::CommandFailed { ref stderr, .. } if !stderr.trim().is_empty() => {
                SyncError::VersionControl {
                    stderr: stderr.trim().to_string(),
                }
            }
            other => SyncError::Internal {
                message: other.to_string(),
            },
        }
    }
}
