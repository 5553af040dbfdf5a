use super::classify::{classify, CommandOutcome, CommandOutput};
use super::{CommitOutcome, VcsError, VcsResult, VersionControl};
use crate::config::ServerConfig;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// [`VersionControl`] backed by the `git` executable, run inside the
/// repository directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_dir: PathBuf,
    remote: String,
    branch: String,
    command_timeout: Option<Duration>,
}

impl GitCli {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            remote: "origin".to_string(),
            branch: "main".to_string(),
            command_timeout: None,
        }
    }

    pub fn from_config(repo_dir: impl Into<PathBuf>, config: &ServerConfig) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            remote: config.remote.clone(),
            branch: config.branch.clone(),
            command_timeout: config.command_timeout(),
        }
    }

    pub fn with_remote(mut self, remote: impl Into<String>, branch: impl Into<String>) -> Self {
        self.remote = remote.into();
        self.branch = branch.into();
        self
    }

    pub fn with_timeout(mut self, command_timeout: Duration) -> Self {
        self.command_timeout = Some(command_timeout);
        self
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    async fn run(&self, args: &[&str]) -> VcsResult<CommandOutput> {
        let command = format!("git {}", args.join(" "));
        debug!("Running {} in {}", command, self.repo_dir.display());

        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.repo_dir).kill_on_drop(true);

        let output = match self.command_timeout {
            Some(limit) => timeout(limit, cmd.output())
                .await
                .map_err(|_| VcsError::Timeout {
                    command: command.clone(),
                    timeout: limit.as_secs(),
                })?,
            None => cmd.output().await,
        }
        .map_err(|source| VcsError::Spawn {
            command: command.clone(),
            source,
        })?;

        let output = CommandOutput::from_process(&output);
        if !output.stdout.trim().is_empty() {
            debug!("stdout: {}", output.stdout.trim());
        }
        if !output.stderr.trim().is_empty() {
            warn!("stderr from {}: {}", command, output.stderr.trim());
        }

        Ok(output)
    }
}

fn failure(command: String, outcome: CommandOutcome) -> VcsError {
    match outcome {
        CommandOutcome::AuthenticationFailed { stderr } => VcsError::Authentication { stderr },
        CommandOutcome::Failed { stderr } => VcsError::CommandFailed { command, stderr },
        CommandOutcome::NothingToCommit => VcsError::CommandFailed {
            command,
            stderr: "nothing to commit".to_string(),
        },
        CommandOutcome::Success => VcsError::CommandFailed {
            command,
            stderr: String::new(),
        },
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn stage(&self, path: &str) -> VcsResult<()> {
        let output = self.run(&["add", "--", path]).await?;
        match classify(&output) {
            CommandOutcome::Success => Ok(()),
            outcome => Err(failure(format!("git add {}", path), outcome)),
        }
    }

    async fn commit(&self, message: &str) -> VcsResult<CommitOutcome> {
        let output = self.run(&["commit", "-m", message]).await?;
        match classify(&output) {
            CommandOutcome::Success => Ok(CommitOutcome::Committed),
            CommandOutcome::NothingToCommit => Ok(CommitOutcome::NothingToCommit),
            outcome => Err(failure("git commit".to_string(), outcome)),
        }
    }

    async fn publish(&self) -> VcsResult<()> {
        let output = self.run(&["push", &self.remote, &self.branch]).await?;
        match classify(&output) {
            CommandOutcome::Success => Ok(()),
            outcome => Err(failure(
                format!("git push {} {}", self.remote, self.branch),
                outcome,
            )),
        }
    }

    fn backend_name(&self) -> &'static str {
        "git"
    }
}
