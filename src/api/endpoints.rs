//! API endpoint handlers
//!
//! This module implements the HTTP endpoints of the relay: prompt to
//! diagram conversion, health check and a root info page.

use crate::core::config::Config;
use crate::core::relay::PromptRelay;
use crate::models::diagram::{ElementsResponse, ErrorDetail, PromptRequest};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub relay: Arc<PromptRelay>,
}

/// Create the API router with all endpoints
///
/// CORS is fully open: the request origin, method and headers are mirrored
/// back and credentials are allowed.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/chat", post(convert_prompt))
        .route("/health", get(health_check))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// POST /api/chat - Convert a prompt to Excalidraw elements
async fn convert_prompt(
    State(state): State<AppState>,
    Json(request): Json<PromptRequest>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();
    info!(%request_id, "📥 Received prompt ({} chars)", request.prompt.len());
    debug!(%request_id, "Prompt: {}", request.prompt);

    match state.relay.relay(&request.prompt).await {
        Ok(elements) => {
            info!(%request_id, "📤 Returning {} elements", elements.len());
            Json(ElementsResponse { elements }).into_response()
        }
        Err(e) => {
            error!(%request_id, kind = e.kind(), "Error: {}: {}", e.kind(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDetail {
                    detail: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health - Health check endpoint
///
/// Does not touch the provider or credentials.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "model": state.config.health_model,
    }))
}

/// GET / - Root endpoint
async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "message": format!("Excalidraw Relay v{}", env!("CARGO_PKG_VERSION")),
        "status": "running",
        "config": {
            "base_url": state.config.base_url,
            "models": state.relay.candidates(),
            "max_tokens": state.config.max_tokens,
        },
        "endpoints": {
            "chat": "/api/chat",
            "health": "/health",
        },
    }))
}
