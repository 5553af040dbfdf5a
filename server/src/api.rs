//! HTTP surface: `POST /read-file` and `POST /update-file`.

use crate::config::{ConfigError, ServerConfig};
use crate::error::SyncError;
use crate::sync::SyncService;
use crate::types::{
    ErrorResponse, ReadFileRequest, ReadFileResponse, UpdateFileRequest, UpdateFileResponse,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SyncService>,
}

impl AppState {
    pub fn new(service: SyncService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/read-file", post(read_file))
        .route("/update-file", post(update_file))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn read_file(
    State(state): State<AppState>,
    payload: Result<Json<ReadFileRequest>, JsonRejection>,
) -> Result<Json<ReadFileResponse>, ApiError> {
    let Json(request) = payload?;
    let path = request.into_path()?;

    let content = state.service.read_file(&path).await?;
    Ok(Json(ReadFileResponse { content }))
}

async fn update_file(
    State(state): State<AppState>,
    payload: Result<Json<UpdateFileRequest>, JsonRejection>,
) -> Result<Json<UpdateFileResponse>, ApiError> {
    let Json(request) = payload?;
    let (path, content) = request.into_parts()?;

    let outcome = state.service.update_file(&path, &content).await?;
    Ok(Json(UpdateFileResponse {
        message: outcome.message(&path),
    }))
}

/// [`SyncError`] rendered as `(status, {"error": ...})`.
#[derive(Debug)]
pub struct ApiError(SyncError);

impl From<SyncError> for ApiError {
    fn from(error: SyncError) -> Self {
        Self(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(SyncError::InvalidBody {
            message: rejection.body_text(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_client_error() {
            warn!("Rejected request: {}", self.0);
        }
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Bind `config.listen_address()` and serve until Ctrl-C.
pub async fn run(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = SyncService::from_config(config)?;
    let base_dir = service.sandbox().root().to_path_buf();
    let address = config.listen_address();

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| ConfigError::Invalid {
            message: format!("Cannot listen on {}: {}", address, e),
        })?;

    info!("Base directory: {}", base_dir.display());
    info!(
        "Publishing to {}/{} (serialized writes: {})",
        config.remote, config.branch, config.serialize_writes
    );
    info!("Sync server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(AppState::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Sync server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
