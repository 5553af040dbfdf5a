use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Placeholder replaced by the relative file path in commit messages.
pub const PATH_PLACEHOLDER: &str = "{path}";

/// Fill `template` with the path exactly as the client sent it.
pub fn render_commit_message(template: &str, relative_path: &str) -> String {
    template.replace(PATH_PLACEHOLDER, relative_path)
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub remote: String,
    pub branch: String,
    pub commit_template: String,
    pub serialize_writes: bool,
    pub command_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            host: "127.0.0.1".to_string(),
            port: 3000,
            remote: "origin".to_string(),
            branch: "main".to_string(),
            commit_template: format!("Auto update {} from browser extension", PATH_PLACEHOLDER),
            serialize_writes: true,
            command_timeout_secs: None,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a TOML config file. Missing keys fall back to the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    pub fn with_commit_template(mut self, template: impl Into<String>) -> Self {
        self.commit_template = template.into();
        self
    }

    pub fn with_serialized_writes(mut self, serialize: bool) -> Self {
        self.serialize_writes = serialize;
        self
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout_secs = Some(timeout.as_secs());
        self
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        self.command_timeout_secs.map(Duration::from_secs)
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_dir.as_os_str().is_empty() {
            return Err("Base directory cannot be empty".to_string());
        }

        if self.host.is_empty() {
            return Err("Host cannot be empty".to_string());
        }

        if self.remote.trim().is_empty() {
            return Err("Remote name cannot be empty".to_string());
        }

        if self.branch.trim().is_empty() {
            return Err("Branch name cannot be empty".to_string());
        }

        if self.remote.starts_with('-') || self.branch.starts_with('-') {
            return Err("Remote and branch names must not start with '-'".to_string());
        }

        if self.commit_template.trim().is_empty() {
            return Err("Commit message template cannot be empty".to_string());
        }

        if self.command_timeout_secs == Some(0) {
            return Err("Command timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
