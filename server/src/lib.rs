pub mod api;
pub mod config;
pub mod error;
pub mod sandbox;
pub mod storage;
pub mod sync;
pub mod types;
pub mod vcs;

#[cfg(test)]
mod testing;

pub use api::{create_router, run, ApiError, AppState};
pub use config::{ConfigError, ServerConfig};
pub use error::{SyncError, SyncResult};
pub use sandbox::Sandbox;
pub use storage::{FileStore, LocalFileStore};
pub use sync::SyncService;
pub use types::{
    ErrorResponse, ReadFileRequest, ReadFileResponse, UpdateFileRequest, UpdateFileResponse,
    WriteOutcome,
};
pub use vcs::{
    classify, CommandOutcome, CommandOutput, CommitOutcome, GitCli, VcsError, VcsResult,
    VersionControl,
};
