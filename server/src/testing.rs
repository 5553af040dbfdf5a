//! Recording fakes for the file-store and version-control seams.

use crate::storage::FileStore;
use crate::vcs::{CommitOutcome, VcsError, VcsResult, VersionControl};
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub(crate) struct RecordingStore {
    pub(crate) calls: Mutex<Vec<String>>,
    pub(crate) missing_dirs: bool,
}

impl RecordingStore {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileStore for RecordingStore {
    async fn read(&self, path: &Path) -> io::Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("read {}", path.display()));
        Err(io::Error::new(io::ErrorKind::NotFound, "No such file"))
    }

    async fn write(&self, path: &Path, _content: &str) -> io::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("write {}", path.display()));
        if self.missing_dirs {
            return Err(io::Error::new(io::ErrorKind::NotFound, "No such directory"));
        }
        Ok(())
    }
}

/// Records calls; `in_flight` counts pipelines between stage and commit.
#[derive(Default)]
pub(crate) struct FakeVcs {
    pub(crate) calls: Mutex<Vec<String>>,
    pub(crate) nothing_to_commit: bool,
    pub(crate) publish_stderr: Option<&'static str>,
    pub(crate) commit_delay: Option<Duration>,
    pub(crate) in_flight: AtomicUsize,
    pub(crate) max_in_flight: AtomicUsize,
}

impl FakeVcs {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl VersionControl for FakeVcs {
    async fn stage(&self, path: &str) -> VcsResult<()> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.record(format!("stage {}", path));
        Ok(())
    }

    async fn commit(&self, message: &str) -> VcsResult<CommitOutcome> {
        self.record(format!("commit {}", message));
        if let Some(delay) = self.commit_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.nothing_to_commit {
            Ok(CommitOutcome::NothingToCommit)
        } else {
            Ok(CommitOutcome::Committed)
        }
    }

    async fn publish(&self) -> VcsResult<()> {
        self.record("publish".to_string());
        match self.publish_stderr {
            Some(stderr) if stderr.contains("Authentication failed") => {
                Err(VcsError::Authentication {
                    stderr: stderr.to_string(),
                })
            }
            Some(stderr) => Err(VcsError::CommandFailed {
                command: "git push origin main".to_string(),
                stderr: stderr.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn backend_name(&self) -> &'static str {
        "fake"
    }
}
