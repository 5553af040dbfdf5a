//! Version control backend for the publish half of a write.
//!
//! The pipeline only sees [`VersionControl`]; [`GitCli`] drives the `git`
//! executable and funnels every command result through [`classify`], the one
//! place that interprets git's output text.

pub mod classify;
pub mod git;

pub use classify::{classify, CommandOutcome, CommandOutput};
pub use git::GitCli;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VcsError {
    #[error("Authentication failed: {stderr}")]
    Authentication { stderr: String },

    #[error("Command `{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` timed out after {timeout}s")]
    Timeout { command: String, timeout: u64 },
}

pub type VcsResult<T> = Result<T, VcsError>;

/// Result of a commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// The index matched HEAD; no commit was created.
    NothingToCommit,
}

#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Stage one path, relative to the repository root.
    async fn stage(&self, path: &str) -> VcsResult<()>;

    async fn commit(&self, message: &str) -> VcsResult<CommitOutcome>;

    /// Push the current commit to the configured remote branch.
    async fn publish(&self) -> VcsResult<()>;

    fn backend_name(&self) -> &'static str;
}
