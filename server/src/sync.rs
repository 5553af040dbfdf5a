//! Read and write-then-publish pipelines over the sandboxed base directory.
//!
//! A write runs `Validate -> Write -> Stage -> Commit -> {Publish | skip}`
//! and stops at the first failing step. Nothing is retried.

use crate::config::{render_commit_message, ConfigError, ServerConfig};
use crate::error::{SyncError, SyncResult};
use crate::sandbox::Sandbox;
use crate::storage::{FileStore, LocalFileStore};
use crate::types::WriteOutcome;
use crate::vcs::{CommitOutcome, GitCli, VersionControl};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

pub struct SyncService {
    sandbox: Sandbox,
    files: Arc<dyn FileStore>,
    vcs: Arc<dyn VersionControl>,
    commit_template: String,
    /// Held for the whole write pipeline when writes are serialized.
    write_lock: Option<Mutex<()>>,
}

impl SyncService {
    pub fn new(sandbox: Sandbox, files: Arc<dyn FileStore>, vcs: Arc<dyn VersionControl>) -> Self {
        Self {
            sandbox,
            files,
            vcs,
            commit_template: ServerConfig::default().commit_template,
            write_lock: Some(Mutex::new(())),
        }
    }

    /// Local files plus the `git` executable, rooted at `config.base_dir`.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        config
            .validate()
            .map_err(|message| ConfigError::Invalid { message })?;

        let sandbox = Sandbox::new(&config.base_dir)?;
        let vcs = GitCli::from_config(sandbox.root(), config);

        Ok(Self::new(sandbox, Arc::new(LocalFileStore::new()), Arc::new(vcs))
            .with_commit_template(config.commit_template.clone())
            .with_serialized_writes(config.serialize_writes))
    }

    pub fn with_commit_template(mut self, template: impl Into<String>) -> Self {
        self.commit_template = template.into();
        self
    }

    pub fn with_serialized_writes(mut self, serialize: bool) -> Self {
        self.write_lock = serialize.then(|| Mutex::new(()));
        self
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    pub fn backend_name(&self) -> &'static str {
        self.vcs.backend_name()
    }

    pub async fn read_file(&self, relative: &str) -> SyncResult<String> {
        let resolved = self.sandbox.resolve(relative)?;

        self.files.read(&resolved).await.map_err(|e| {
            error!("Failed to read {}: {}", resolved.display(), e);
            SyncError::ReadFailed {
                message: e.to_string(),
            }
        })
    }

    pub async fn update_file(&self, relative: &str, content: &str) -> SyncResult<WriteOutcome> {
        let resolved = self.sandbox.resolve(relative)?;

        let _guard = match &self.write_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        };

        match self.write_and_publish(relative, &resolved, content).await {
            Ok(outcome) => {
                info!("Update of {} finished: {:?}", relative, outcome);
                Ok(outcome)
            }
            Err(e) => {
                error!("Update of {} failed: {}", relative, e);
                Err(e)
            }
        }
    }

    async fn write_and_publish(
        &self,
        relative: &str,
        resolved: &std::path::Path,
        content: &str,
    ) -> SyncResult<WriteOutcome> {
        self.files
            .write(resolved, content)
            .await
            .map_err(SyncError::from_write)?;
        info!("Wrote {} ({} bytes)", resolved.display(), content.len());

        let repo_path = self.sandbox.relative(resolved)?;
        self.vcs.stage(&repo_path.to_string_lossy()).await?;
        debug!("Staged {}", repo_path.display());

        let message = render_commit_message(&self.commit_template, relative);
        match self.vcs.commit(&message).await? {
            CommitOutcome::NothingToCommit => {
                info!("Nothing to commit for {}, skipping publish", relative);
                return Ok(WriteOutcome::Unchanged);
            }
            CommitOutcome::Committed => debug!("Committed: {}", message),
        }

        self.vcs.publish().await?;
        Ok(WriteOutcome::Published)
    }
}
