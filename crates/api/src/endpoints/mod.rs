//! API endpoints.

pub mod health;
pub mod reports;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router. The server nests this under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/reports", reports::router())
        .merge(health::router())
}
