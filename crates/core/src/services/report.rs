//! Report service.
//!
//! Orchestrates validation, defaulting and the urgency derivation around
//! the repository: every write goes through normalize -> validate ->
//! derive-urgency before it reaches the store.

use std::str::FromStr;

use chrono::Utc;
use naijafix_common::{AppError, AppResult, IdGenerator, validate_id};
use naijafix_db::entities::report::{self, Category, Priority, ReportStatus};
use naijafix_db::repositories::{
    CategoryBreakdown, Page, ReportFilter, ReportRepository, StateCount,
};
use sea_orm::{IntoActiveModel, Set};
use serde::Serialize;
use tracing::info;
use validator::Validate;

use crate::validation::{
    CreateReportPayload, UpdateReportPayload, derive_urgency, first_validation_message,
};

/// Aggregate totals for the statistics endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// All reports.
    pub total: u64,
    /// Pending reports.
    pub pending: u64,
    /// In-progress reports.
    pub in_progress: u64,
    /// Resolved reports.
    pub resolved: u64,
    /// Per-category breakdown, largest first.
    pub by_category: Vec<CategoryBreakdown>,
    /// Per-state counts, unordered.
    pub by_state: Vec<StateCount>,
}

/// Service for managing citizen reports.
#[derive(Clone)]
pub struct ReportService {
    report_repo: ReportRepository,
    id_gen: IdGenerator,
}

impl ReportService {
    /// Create a new report service.
    #[must_use]
    pub const fn new(report_repo: ReportRepository) -> Self {
        Self {
            report_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a report. Applies creation defaults (`pending` status,
    /// `medium` priority, zero votes) and the urgency derivation.
    pub async fn create(&self, mut payload: CreateReportPayload) -> AppResult<report::Model> {
        payload.normalize();
        payload
            .validate()
            .map_err(|e| AppError::Validation(first_validation_message(&e)))?;

        // Required fields are guaranteed present by validation.
        let location = payload.location.unwrap_or_default();
        let priority = parse_or_default(payload.priority.as_deref())?;
        let is_urgent = derive_urgency(priority, payload.is_urgent.unwrap_or(false));
        let now = Utc::now();

        let active = report::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(payload.title.unwrap_or_default()),
            description: Set(payload.description.unwrap_or_default()),
            category: Set(parse_category(payload.category.as_deref().unwrap_or_default())?),
            priority: Set(priority),
            area: Set(location.area.unwrap_or_default()),
            lga: Set(location.lga.unwrap_or_default()),
            state: Set(location.state.unwrap_or_default()),
            latitude: Set(location.coordinates.map(|c| c.latitude)),
            longitude: Set(location.coordinates.map(|c| c.longitude)),
            image: Set(payload.image.filter(|i| !i.is_empty())),
            status: Set(ReportStatus::Pending),
            userid: Set(payload.userid.unwrap_or_default()),
            assigned_to: Set(None),
            resolution_notes: Set(None),
            estimated_resolution_date: Set(None),
            votes: Set(0),
            is_urgent: Set(is_urgent),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let created = self.report_repo.create(active).await?;
        info!(id = %created.id, category = %created.category, "Report created");
        Ok(created)
    }

    /// Get a report by ID. Malformed ids fail before the lookup.
    pub async fn get(&self, id: &str) -> AppResult<report::Model> {
        validate_id(id)?;
        self.report_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ReportNotFound(id.to_string()))
    }

    /// List reports matching the optional filters, newest first.
    pub async fn list(
        &self,
        status: Option<&str>,
        category: Option<&str>,
        state: Option<&str>,
        page: u64,
        limit: u64,
    ) -> AppResult<Page<report::Model>> {
        let filter = ReportFilter {
            status: status.map(parse_status).transpose()?,
            category: category.map(parse_category).transpose()?,
            state: state.map(ToString::to_string),
        };
        self.report_repo.find_page(&filter, page, limit).await
    }

    /// List a user's reports, newest first.
    pub async fn list_by_user(
        &self,
        userid: &str,
        page: u64,
        limit: u64,
    ) -> AppResult<Page<report::Model>> {
        self.report_repo.find_by_user(userid, page, limit).await
    }

    /// List one category's reports, newest first.
    pub async fn list_by_category(
        &self,
        category: &str,
        page: u64,
        limit: u64,
    ) -> AppResult<Page<report::Model>> {
        let filter = ReportFilter {
            category: Some(parse_category(category)?),
            ..ReportFilter::default()
        };
        self.report_repo.find_page(&filter, page, limit).await
    }

    /// Full update: provided fields replace stored ones after re-validation;
    /// the urgency derivation runs against the merged result.
    pub async fn update(
        &self,
        id: &str,
        mut payload: UpdateReportPayload,
    ) -> AppResult<report::Model> {
        validate_id(id)?;
        payload.normalize();
        payload
            .validate()
            .map_err(|e| AppError::Validation(first_validation_message(&e)))?;

        let existing = self
            .report_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ReportNotFound(id.to_string()))?;

        let current_priority = existing.priority;
        let current_urgent = existing.is_urgent;
        let mut active = existing.into_active_model();

        if let Some(title) = payload.title {
            active.title = Set(title);
        }
        if let Some(description) = payload.description {
            active.description = Set(description);
        }
        if let Some(category) = payload.category {
            active.category = Set(parse_category(&category)?);
        }
        if let Some(location) = payload.location {
            if let Some(area) = location.area {
                active.area = Set(area);
            }
            if let Some(lga) = location.lga {
                active.lga = Set(lga);
            }
            if let Some(state) = location.state {
                active.state = Set(state);
            }
            if let Some(coordinates) = location.coordinates {
                active.latitude = Set(Some(coordinates.latitude));
                active.longitude = Set(Some(coordinates.longitude));
            }
        }
        if let Some(image) = payload.image {
            // an empty string clears the stored URL
            active.image = Set(Some(image).filter(|i| !i.is_empty()));
        }
        if let Some(status) = payload.status {
            active.status = Set(parse_status(&status)?);
        }
        if let Some(assigned_to) = payload.assigned_to {
            active.assigned_to = Set(Some(assigned_to).filter(|a| !a.is_empty()));
        }
        if let Some(notes) = payload.resolution_notes {
            active.resolution_notes = Set(Some(notes));
        }
        if let Some(date) = payload.estimated_resolution_date {
            active.estimated_resolution_date = Set(Some(date.into()));
        }
        if let Some(votes) = payload.votes {
            active.votes = Set(votes);
        }

        let priority = match payload.priority {
            Some(ref p) => {
                let parsed = parse_priority(p)?;
                active.priority = Set(parsed);
                parsed
            }
            None => current_priority,
        };
        let manual_urgent = payload.is_urgent.unwrap_or(current_urgent);
        active.is_urgent = Set(derive_urgency(priority, manual_urgent));
        active.updated_at = Set(Utc::now().into());

        self.report_repo.update(active).await
    }

    /// Status-only update; `resolution_notes` are recorded when resolving.
    /// The status value is checked before the lookup happens.
    pub async fn update_status(
        &self,
        id: &str,
        status: &str,
        resolution_notes: Option<String>,
    ) -> AppResult<report::Model> {
        let status = parse_status(status)?;
        validate_id(id)?;

        let existing = self
            .report_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ReportNotFound(id.to_string()))?;

        let priority = existing.priority;
        let is_urgent = existing.is_urgent;
        let mut active = existing.into_active_model();
        active.status = Set(status);
        if status == ReportStatus::Resolved {
            if let Some(notes) = resolution_notes {
                active.resolution_notes = Set(Some(notes));
            }
        }
        active.is_urgent = Set(derive_urgency(priority, is_urgent));
        active.updated_at = Set(Utc::now().into());

        let updated = self.report_repo.update(active).await?;
        info!(id = %updated.id, status = %updated.status, "Report status updated");
        Ok(updated)
    }

    /// Mark a report resolved, recording the resolution notes.
    pub async fn mark_resolved(
        &self,
        id: &str,
        resolution_notes: Option<String>,
    ) -> AppResult<report::Model> {
        self.update_status(id, ReportStatus::Resolved.as_str(), resolution_notes)
            .await
    }

    /// Delete a report. Physical and immediate; no soft delete.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        validate_id(id)?;
        if self.report_repo.delete(id).await? {
            info!(id = %id, "Report deleted");
            Ok(())
        } else {
            Err(AppError::ReportNotFound(id.to_string()))
        }
    }

    /// Aggregate totals plus the category and state breakdowns.
    pub async fn stats_summary(&self) -> AppResult<StatsSummary> {
        let total = self.report_repo.count_all().await?;
        let pending = self.report_repo.count_by_status(ReportStatus::Pending).await?;
        let in_progress = self
            .report_repo
            .count_by_status(ReportStatus::InProgress)
            .await?;
        let resolved = self
            .report_repo
            .count_by_status(ReportStatus::Resolved)
            .await?;
        let by_category = self.report_repo.aggregate_by_category().await?;
        let by_state = self.report_repo.aggregate_by_state().await?;

        Ok(StatsSummary {
            total,
            pending,
            in_progress,
            resolved,
            by_category,
            by_state,
        })
    }
}

fn parse_category(value: &str) -> AppResult<Category> {
    Category::from_str(value).map_err(AppError::Validation)
}

fn parse_priority(value: &str) -> AppResult<Priority> {
    Priority::from_str(value).map_err(AppError::Validation)
}

fn parse_status(value: &str) -> AppResult<ReportStatus> {
    ReportStatus::from_str(value).map_err(AppError::Validation)
}

fn parse_or_default(priority: Option<&str>) -> AppResult<Priority> {
    match priority {
        None => Ok(Priority::default()),
        Some("") => Ok(Priority::default()),
        Some(value) => parse_priority(value),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::validation::LocationPayload;
    use std::sync::Arc;

    use std::collections::BTreeMap;

    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    fn count_row(total: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("num_items", Value::BigInt(Some(total)))])
    }

    fn stored_report() -> report::Model {
        let at = Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap();
        report::Model {
            id: "01hgw2bkr9v4n8w0qzfx3m7yta".to_string(),
            title: "Bad Pothole on Main Road".to_string(),
            description: "Large pothole damaging vehicles daily".to_string(),
            category: Category::Roads,
            priority: Priority::Medium,
            area: "Garki".to_string(),
            lga: String::new(),
            state: "Federal Capital Territory".to_string(),
            latitude: None,
            longitude: None,
            image: None,
            status: ReportStatus::Pending,
            userid: "u1".to_string(),
            assigned_to: None,
            resolution_notes: None,
            estimated_resolution_date: None,
            votes: 0,
            is_urgent: false,
            created_at: at.into(),
            updated_at: at.into(),
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> ReportService {
        ReportService::new(ReportRepository::new(Arc::new(db)))
    }

    fn create_payload() -> CreateReportPayload {
        CreateReportPayload {
            title: Some("Bad Pothole on Main Road".to_string()),
            description: Some("Large pothole damaging vehicles daily".to_string()),
            category: Some("Roads".to_string()),
            location: Some(LocationPayload {
                area: Some("Garki".to_string()),
                state: Some("Federal Capital Territory".to_string()),
                ..LocationPayload::default()
            }),
            userid: Some("u1".to_string()),
            ..CreateReportPayload::default()
        }
    }

    #[tokio::test]
    async fn create_applies_defaults() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_report()]])
            .into_connection();
        let service = service_with(db);

        let created = service.create(create_payload()).await.unwrap();
        assert_eq!(created.status, ReportStatus::Pending);
        assert_eq!(created.priority, Priority::Medium);
        assert_eq!(created.votes, 0);
    }

    #[tokio::test]
    async fn create_rejects_invalid_payload_before_any_write() {
        // No mock results registered: a DB round trip would error loudly.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);

        let mut payload = create_payload();
        payload.title = None;
        let err = service.create(payload).await.unwrap_err();
        assert_eq!(err.to_string(), "Title is required");

        let mut payload = create_payload();
        payload.location.as_mut().unwrap().state = Some("Wakanda".to_string());
        let err = service.create(payload).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid state: Wakanda");
    }

    #[tokio::test]
    async fn urgent_priority_forces_urgency_flag() {
        let mut expected = stored_report();
        expected.priority = Priority::Urgent;
        expected.is_urgent = true;
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![expected]])
            .into_connection();
        let service = service_with(db);

        let mut payload = create_payload();
        payload.priority = Some("urgent".to_string());
        payload.is_urgent = Some(false);
        let created = service.create(payload).await.unwrap();
        assert!(created.is_urgent);
    }

    #[tokio::test]
    async fn get_rejects_malformed_id_before_lookup() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);

        let err = service.get("not-an-id").await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ID");
    }

    #[tokio::test]
    async fn update_status_rejects_out_of_set_value_before_lookup() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);

        let err = service
            .update_status("01hgw2bkr9v4n8w0qzfx3m7yta", "archived", None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid status: archived");
    }

    #[tokio::test]
    async fn update_status_reports_missing_report() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<report::Model>::new()])
            .into_connection();
        let service = service_with(db);

        let err = service
            .update_status("01hgw2bkr9v4n8w0qzfx3m7yta", "resolved", None)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "REPORT_NOT_FOUND");
    }

    #[tokio::test]
    async fn update_status_is_idempotent() {
        let mut in_progress = stored_report();
        in_progress.status = ReportStatus::InProgress;
        // find + update per call; the second call starts from the already
        // transitioned row and lands on the same state.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![stored_report()],
                vec![in_progress.clone()],
                vec![in_progress.clone()],
                vec![in_progress],
            ])
            .into_connection();
        let service = service_with(db);

        let first = service
            .update_status("01hgw2bkr9v4n8w0qzfx3m7yta", "in-progress", None)
            .await
            .unwrap();
        let second = service
            .update_status("01hgw2bkr9v4n8w0qzfx3m7yta", "in-progress", None)
            .await
            .unwrap();

        assert_eq!(first.status, ReportStatus::InProgress);
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn stats_summary_of_empty_collection_is_all_zeroes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![count_row(0)],
                vec![count_row(0)],
                vec![count_row(0)],
                vec![count_row(0)],
                Vec::new(),
                Vec::new(),
            ])
            .into_connection();
        let service = service_with(db);

        let stats = service.stats_summary().await.unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.in_progress, 0);
        assert_eq!(stats.resolved, 0);
        assert!(stats.by_category.is_empty());
        assert!(stats.by_state.is_empty());
    }

    #[tokio::test]
    async fn delete_missing_report_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let service = service_with(db);

        let err = service.delete("01hgw2bkr9v4n8w0qzfx3m7yta").await.unwrap_err();
        assert_eq!(err.error_code(), "REPORT_NOT_FOUND");
    }

    #[tokio::test]
    async fn list_rejects_unknown_filter_values() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service_with(db);

        let err = service
            .list(Some("archived"), None, None, 1, 10)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid status: archived");

        let err = service.list_by_category("Potholes", 1, 10).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid category: Potholes");
    }
}
