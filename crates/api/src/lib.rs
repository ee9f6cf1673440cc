//! HTTP API layer for naijafix-rs.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: report CRUD, pagination, aggregate statistics, health
//! - **Response envelope**: the uniform `{success, data, error, message,
//!   pagination}` JSON wrapper
//! - **Middleware**: application state, CORS and request tracing wiring
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
pub use response::{ApiResponse, Pagination};
