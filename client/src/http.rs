use crate::client::{ClientError, ClientResult, SyncClient};
use crate::config::SyncClientConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadFileBody<'a> {
    file_path: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateFileBody<'a> {
    file_path: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ReadFileReply {
    content: String,
}

#[derive(Deserialize)]
struct UpdateFileReply {
    message: String,
}

pub struct HttpSyncClient {
    http_client: reqwest::Client,
    config: SyncClientConfig,
}

impl HttpSyncClient {
    pub fn new(config: SyncClientConfig) -> ClientResult<Self> {
        config
            .validate()
            .map_err(|message| ClientError::InvalidConfig { message })?;

        let http_client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ClientError::InvalidConfig {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn with_default_config() -> ClientResult<Self> {
        Self::new(SyncClientConfig::default())
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> ClientResult<R>
    where
        B: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let url = self.config.endpoint_url(endpoint);
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    ClientError::ServiceUnavailable {
                        message: e.to_string(),
                    }
                } else {
                    ClientError::Network(e)
                }
            })?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::from_response(status.as_u16(), &text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl SyncClient for HttpSyncClient {
    async fn read_file(&self, file_path: &str) -> ClientResult<String> {
        let reply: ReadFileReply = self
            .post("read-file", &ReadFileBody { file_path })
            .await?;
        info!("Read {} ({} bytes)", file_path, reply.content.len());
        Ok(reply.content)
    }

    async fn update_file(&self, file_path: &str, content: &str) -> ClientResult<String> {
        let reply: UpdateFileReply = self
            .post("update-file", &UpdateFileBody { file_path, content })
            .await?;
        info!("{}", reply.message);
        Ok(reply.message)
    }

    fn client_name(&self) -> &'static str {
        "http"
    }
}
