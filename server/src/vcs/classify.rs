//! Text heuristics over git's output.
//!
//! Git has no machine-readable status for these cases, so the wording is
//! matched directly. A change in git's messages (or a non-English locale)
//! turns a benign no-op or an auth failure into a generic failure.

/// Phrasings `git commit` uses when the index already matches HEAD. The
/// last two appear when the work tree has untracked files or unstaged edits
/// to other tracked files.
const NOTHING_TO_COMMIT: [&str; 3] = [
    "nothing to commit",
    "nothing added to commit",
    "no changes added to commit",
];
const AUTHENTICATION_FAILED: &str = "Authentication failed";

/// Captured result of one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>, success: bool) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            success,
        }
    }

    pub fn from_process(output: &std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        }
    }

    /// Error text to report: stderr, or stdout when git wrote nothing there.
    pub fn error_text(&self) -> &str {
        if self.stderr.trim().is_empty() {
            self.stdout.trim()
        } else {
            self.stderr.trim()
        }
    }
}

/// Closed set of outcomes a command result maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    NothingToCommit,
    AuthenticationFailed { stderr: String },
    Failed { stderr: String },
}

/// Map a raw command result to a [`CommandOutcome`].
///
/// `git commit` reports an empty index on stdout with a non-zero exit, so
/// both streams are searched for that case.
pub fn classify(output: &CommandOutput) -> CommandOutcome {
    if output.success {
        return CommandOutcome::Success;
    }

    let empty_index = NOTHING_TO_COMMIT
        .iter()
        .any(|phrase| output.stdout.contains(phrase) || output.stderr.contains(phrase));
    if empty_index {
        return CommandOutcome::NothingToCommit;
    }

    if output.stderr.contains(AUTHENTICATION_FAILED) {
        return CommandOutcome::AuthenticationFailed {
            stderr: output.stderr.trim().to_string(),
        };
    }

    CommandOutcome::Failed {
        stderr: output.error_text().to_string(),
    }
}
