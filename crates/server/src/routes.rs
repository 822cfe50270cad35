//! HTTP route handlers.
//!
//! Thin glue over the answer pipeline: deserialization, status-code
//! mapping, and the health/status reporting surfaces.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Request body for `POST /ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    question: String,
}

/// Build the router with all routes and middleware layers.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/health", get(health))
        .route("/status", get(status))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Main endpoint for asking compliance questions.
async fn ask(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> (StatusCode, Json<Value>) {
    match state.service.answer(&body.question).await {
        Ok(success) => (StatusCode::OK, Json(json!(success))),
        Err(failure) if failure.code.is_client_error() => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": failure.message })),
        ),
        Err(failure) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "answer": failure.answer,
                "error": failure.code,
            })),
        ),
    }
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    let gateway_reachable = state.client.probe().await;

    Json(json!({
        "status": "healthy",
        "compliance_data_loaded": state.store.is_loaded(),
        "compliance_records_count": state.store.len(),
        "openai_connection": gateway_reachable,
    }))
}

/// Detailed status information about the service.
async fn status(State(state): State<Arc<AppState>>) -> Json<Value> {
    let settings = state.client.settings();

    Json(json!({
        "service": "complybot",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "compliance_data": {
            "loaded": state.store.is_loaded(),
            "record_count": state.store.len(),
            "categories": state.store.categories(),
        },
        "gateway": {
            "provider": state.client.provider_name(),
            "model": settings.model,
            "max_tokens": settings.max_tokens,
            "temperature": settings.temperature,
            "api_key_configured": state.config.resolve_api_key().is_some(),
        },
        "endpoints": {
            "health": "/health",
            "ask": "/ask (POST)",
            "status": "/status",
        },
    }))
}

/// Fallback for unknown routes.
async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "available_endpoints": ["/health", "/ask", "/status"],
        })),
    )
}
