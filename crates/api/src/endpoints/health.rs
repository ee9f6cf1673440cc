//! Health check endpoint.

use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;
use serde::Serialize;

use crate::middleware::AppState;

/// Create health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub message: String,
    pub database: String,
    pub timestamp: String,
    pub environment: String,
}

/// Liveness probe; reports database connectivity without failing the request.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if state.db.ping().await.is_ok() {
        "Connected".to_string()
    } else {
        "Disconnected".to_string()
    };

    Json(HealthResponse {
        message: "NaijaFix API is running".to_string(),
        database,
        timestamp: Utc::now().to_rfc3339(),
        environment: std::env::var("NAIJAFIX_ENV").unwrap_or_else(|_| "development".to_string()),
    })
}
