use crate::error::{SyncError, SyncResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadFileRequest {
    #[serde(default)]
    pub file_path: Option<String>,
}

impl ReadFileRequest {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: Some(file_path.into()),
        }
    }

    pub fn into_path(self) -> SyncResult<String> {
        match self.file_path {
            Some(path) if !path.is_empty() => Ok(path),
            _ => Err(SyncError::EmptyPath),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileRequest {
    #[serde(default)]
    pub file_path: Option<String>,
    /// An empty string is valid content; only an absent or null field is rejected.
    #[serde(default)]
    pub content: Option<String>,
}

impl UpdateFileRequest {
    pub fn new(file_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_path: Some(file_path.into()),
            content: Some(content.into()),
        }
    }

    pub fn into_parts(self) -> SyncResult<(String, String)> {
        match (self.file_path, self.content) {
            (Some(path), Some(content)) if !path.is_empty() => Ok((path, content)),
            _ => Err(SyncError::MissingContent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadFileResponse {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateFileResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Terminal success states of the write pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Committed and pushed.
    Published,
    /// Saved, but the commit step found nothing to commit; push skipped.
    Unchanged,
}

impl WriteOutcome {
    pub fn message(&self, relative_path: &str) -> String {
        match self {
            WriteOutcome::Published => format!(
                "File \"{}\" saved and synchronized to the remote.",
                relative_path
            ),
            WriteOutcome::Unchanged => format!(
                "File \"{}\" saved, but its content did not change; nothing to commit.",
                relative_path
            ),
        }
    }
}
