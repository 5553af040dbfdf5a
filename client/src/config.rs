use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Where the sync server lives and how long to wait for it.
///
/// `connect_timeout` bounds reaching the server; `request_timeout` bounds the
/// whole exchange, which for `update-file` includes the server's git push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncClientConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for SyncClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl SyncClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surrounding whitespace and trailing slashes are dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// `<base_url>/<endpoint>`, tolerating a leading slash on `endpoint`.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    pub fn validate(&self) -> Result<(), String> {
        let rest = self
            .base_url
            .strip_prefix("http://")
            .or_else(|| self.base_url.strip_prefix("https://"))
            .ok_or_else(|| format!("Base URL '{}' must be http:// or https://", self.base_url))?;

        if rest.trim_end_matches('/').is_empty() {
            return Err("Base URL has no host".to_string());
        }
        // Endpoints are appended to the base URL, so it cannot carry these.
        if rest.contains(['?', '#']) {
            return Err(format!(
                "Base URL '{}' must not contain a query or fragment",
                self.base_url
            ));
        }

        if self.connect_timeout.is_zero() || self.request_timeout.is_zero() {
            return Err("Timeouts must be greater than 0".to_string());
        }
        if self.connect_timeout > self.request_timeout {
            return Err("Connect timeout cannot exceed the request timeout".to_string());
        }

        Ok(())
    }
}
