use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cannot reach the sync server or the request failed: {message}")]
    ServiceUnavailable { message: String },

    /// Non-2xx response; `message` is the server's `error` field when present.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Build the error for a failed response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("error")?.as_str().map(str::to_string))
            .filter(|error| !error.is_empty())
            .unwrap_or_else(|| format!("Server error: {}", status));

        ClientError::Server { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The two operations the extension relays to the local server.
#[async_trait]
pub trait SyncClient: Send + Sync {
    async fn read_file(&self, file_path: &str) -> ClientResult<String>;

    /// Returns the server's confirmation message.
    async fn update_file(&self, file_path: &str, content: &str) -> ClientResult<String>;

    fn client_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockClient {
        files: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl SyncClient for MockClient {
        async fn read_file(&self, file_path: &str) -> ClientResult<String> {
            self.files
                .lock()
                .unwrap()
                .get(file_path)
                .cloned()
                .ok_or_else(|| ClientError::Server {
                    status: 500,
                    message: format!("Unable to read file: {}", file_path),
                })
        }

        async fn update_file(&self, file_path: &str, content: &str) -> ClientResult<String> {
            self.files
                .lock()
                .unwrap()
                .insert(file_path.to_string(), content.to_string());
            Ok(format!("File \"{}\" saved", file_path))
        }

        fn client_name(&self) -> &'static str {
            "mock"
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let client = MockClient::default();

        assert!(client.read_file("a.js").await.is_err());
        let message = client.update_file("a.js", "x").await.unwrap();
        assert!(message.contains("a.js"));
        assert_eq!(client.read_file("a.js").await.unwrap(), "x");
        assert_eq!(client.client_name(), "mock");
    }

    #[test]
    fn test_error_from_response_uses_error_field() {
        let err = ClientError::from_response(403, r#"{"error":"Access to path '../x' is not allowed."}"#);
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.to_string(), "Access to path '../x' is not allowed.");
    }

    #[test]
    fn test_error_from_response_fallback() {
        let err = ClientError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "Server error: 502");

        let err = ClientError::from_response(500, r#"{"error":""}"#);
        assert_eq!(err.to_string(), "Server error: 500");

        let err = ClientError::from_response(500, r#"{"message":"no error field"}"#);
        assert_eq!(err.to_string(), "Server error: 500");
    }

    #[test]
    fn test_status_only_for_server_errors() {
        let err = ClientError::ServiceUnavailable {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("connection refused"));
    }
}
