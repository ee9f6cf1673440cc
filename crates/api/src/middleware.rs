//! API middleware and shared state.

use std::sync::Arc;

use naijafix_core::ReportService;
use sea_orm::DatabaseConnection;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Report domain service.
    pub report_service: ReportService,
    /// Raw connection handle, used by the health check.
    pub db: Arc<DatabaseConnection>,
}

impl AppState {
    /// Assemble the application state from a database connection.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        use naijafix_db::repositories::ReportRepository;

        let report_repo = ReportRepository::new(Arc::clone(&db));
        Self {
            report_service: ReportService::new(report_repo),
            db,
        }
    }
}
