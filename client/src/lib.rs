pub mod client;
pub mod config;
pub mod http;

pub use client::{ClientError, ClientResult, SyncClient};
pub use config::SyncClientConfig;
pub use http::HttpSyncClient;

pub mod prelude {
    pub use crate::client::*;
    pub use crate::config::*;
    pub use crate::http::*;
}
