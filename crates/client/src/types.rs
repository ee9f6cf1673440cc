//! Wire types for the NaijaFix API.
//!
//! These mirror the server's JSON contract without depending on the server
//! crates. Enumerated fields stay as strings here; the server is the
//! authority on the allowed sets and rejects anything else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub code: Option<String>,
    pub pagination: Option<Pagination>,
}

/// Pagination metadata from list endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

/// Report coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoordinatesInput {
    pub latitude: f64,
    pub longitude: f64,
}

/// Report location as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub area: String,
    pub lga: String,
    pub state: String,
    #[serde(default)]
    pub coordinates: Option<CoordinatesInput>,
}

/// A report as returned by the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub location: Location,
    #[serde(default)]
    pub image: Option<String>,
    pub status: String,
    pub userid: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub resolution_notes: Option<String>,
    #[serde(default)]
    pub estimated_resolution_date: Option<DateTime<Utc>>,
    pub votes: i32,
    pub is_urgent: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of reports plus its pagination metadata.
#[derive(Debug, Clone)]
pub struct ReportPage {
    pub reports: Vec<Report>,
    pub pagination: Option<Pagination>,
}

/// Optional list filters; unset fields are omitted from the query string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// Location fields for a new report.
#[derive(Debug, Clone, Serialize)]
pub struct LocationInput {
    pub area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lga: Option<String>,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CoordinatesInput>,
}

/// Payload for creating a report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    pub location: LocationInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub userid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_urgent: Option<bool>,
}

/// Payload for a full report update. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReportRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_resolution_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_urgent: Option<bool>,
}

/// Category breakdown row from the statistics endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: String,
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub resolved: u64,
}

/// State count row from the statistics endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StateCount {
    pub state: String,
    pub count: u64,
}

/// Aggregate statistics from `/reports/stats/summary`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub by_category: Vec<CategoryBreakdown>,
    pub by_state: Vec<StateCount>,
}

/// Health check payload from `/health`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub message: String,
    pub database: String,
    pub timestamp: String,
    pub environment: String,
}

/// Result of a connectivity probe.
#[derive(Debug, Clone)]
pub enum ConnectionStatus {
    /// The API answered the health check.
    Connected(Health),
    /// The health check failed; carries the error message.
    Disconnected(String),
}

impl ConnectionStatus {
    /// Whether the API is reachable.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }
}
