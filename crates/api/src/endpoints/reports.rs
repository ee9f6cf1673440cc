//! Report endpoints.

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use chrono::{DateTime, Utc};
use naijafix_common::{AppError, AppResult};
use naijafix_core::{CreateReportPayload, StatsSummary, UpdateReportPayload};
use naijafix_db::entities::report::{self, Category, Priority, ReportStatus};
use naijafix_db::repositories::Page;
use serde::{Deserialize, Serialize};

use crate::{
    extractors::Json,
    middleware::AppState,
    response::{ApiResponse, Pagination},
};

/// Create report router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reports).post(create_report))
        .route("/stats/summary", get(stats_summary))
        .route("/user/{userid}", get(list_user_reports))
        .route("/category/{category}", get(list_category_reports))
        .route(
            "/{id}",
            get(get_report).put(update_report).delete(delete_report),
        )
        .route("/{id}/status", patch(update_report_status))
}

/// Coordinates in a report response.
#[derive(Debug, Serialize)]
pub struct CoordinatesResponse {
    pub latitude: f64,
    pub longitude: f64,
}

/// Nested location in a report response.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub area: String,
    pub lga: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CoordinatesResponse>,
}

/// Report response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub location: LocationResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub status: ReportStatus,
    pub userid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_resolution_date: Option<DateTime<Utc>>,
    pub votes: i32,
    pub is_urgent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<report::Model> for ReportResponse {
    fn from(model: report::Model) -> Self {
        let coordinates = match (model.latitude, model.longitude) {
            (Some(latitude), Some(longitude)) => Some(CoordinatesResponse {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            category: model.category,
            priority: model.priority,
            location: LocationResponse {
                area: model.area,
                lga: model.lga,
                state: model.state,
                coordinates,
            },
            image: model.image,
            status: model.status,
            userid: model.userid,
            assigned_to: model.assigned_to,
            resolution_notes: model.resolution_notes,
            estimated_resolution_date: model
                .estimated_resolution_date
                .map(|d| d.with_timezone(&Utc)),
            votes: model.votes,
            is_urgent: model.is_urgent,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

fn page_response(page: Page<report::Model>) -> ApiResponse<Vec<ReportResponse>> {
    let pagination = Pagination {
        page: page.page,
        limit: page.limit,
        total: page.total,
        pages: page.pages,
    };
    let items: Vec<ReportResponse> = page.items.into_iter().map(ReportResponse::from).collect();
    ApiResponse::ok(items).with_pagination(pagination)
}

/// List reports query.
#[derive(Debug, Deserialize)]
pub struct ListReportsQuery {
    /// Filter by workflow status.
    pub status: Option<String>,
    /// Filter by issue category.
    pub category: Option<String>,
    /// Filter by Nigerian state.
    pub state: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

/// Pagination-only query.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

const fn default_page() -> u64 {
    1
}

const fn default_limit() -> u64 {
    10
}

/// List reports with optional filters.
async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ListReportsQuery>,
) -> AppResult<ApiResponse<Vec<ReportResponse>>> {
    let page = state
        .report_service
        .list(
            query.status.as_deref(),
            query.category.as_deref(),
            query.state.as_deref(),
            query.page,
            query.limit,
        )
        .await?;

    Ok(page_response(page))
}

/// Get a single report.
async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<ReportResponse>> {
    let report = state.report_service.get(&id).await?;
    Ok(ApiResponse::ok(report.into()))
}

/// List a user's reports.
async fn list_user_reports(
    State(state): State<AppState>,
    Path(userid): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<Vec<ReportResponse>>> {
    let page = state
        .report_service
        .list_by_user(&userid, query.page, query.limit)
        .await?;

    Ok(page_response(page))
}

/// List one category's reports.
async fn list_category_reports(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<Vec<ReportResponse>>> {
    let page = state
        .report_service
        .list_by_category(&category, query.page, query.limit)
        .await?;

    Ok(page_response(page))
}

/// Create a report.
async fn create_report(
    State(state): State<AppState>,
    Json(payload): Json<CreateReportPayload>,
) -> AppResult<ApiResponse<ReportResponse>> {
    let report = state.report_service.create(payload).await?;
    Ok(ApiResponse::created(ReportResponse::from(report))
        .with_message("Report created successfully"))
}

/// Full update of a report.
async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateReportPayload>,
) -> AppResult<ApiResponse<ReportResponse>> {
    let report = state.report_service.update(&id, payload).await?;
    Ok(ApiResponse::ok(report.into()))
}

/// Status update request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    /// New workflow status. Required.
    pub status: Option<String>,
    /// Notes to record when resolving.
    pub resolution_notes: Option<String>,
}

/// Status-only update.
async fn update_report_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> AppResult<ApiResponse<ReportResponse>> {
    let status = request
        .status
        .ok_or_else(|| AppError::Validation("Status is required".to_string()))?;

    let report = state
        .report_service
        .update_status(&id, &status, request.resolution_notes)
        .await?;

    Ok(ApiResponse::ok(report.into()))
}

/// Delete confirmation payload.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    /// Identifier of the removed report.
    pub id: String,
}

/// Delete a report.
async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<DeletedResponse>> {
    state.report_service.delete(&id).await?;
    Ok(ApiResponse::ok(DeletedResponse { id }).with_message("Report deleted successfully"))
}

/// Aggregate statistics.
async fn stats_summary(
    State(state): State<AppState>,
) -> AppResult<ApiResponse<StatsSummary>> {
    let summary = state.report_service.stats_summary().await?;
    Ok(ApiResponse::ok(summary))
}
