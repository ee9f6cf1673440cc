//! Typed client for the report endpoints.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::ApiClientError;
use crate::types::{
    ConnectionStatus, CreateReportRequest, Envelope, Health, ListFilters, Report, ReportPage,
    StatsSummary, UpdateReportRequest,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the NaijaFix report API.
#[derive(Debug, Clone)]
pub struct ReportsClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl ReportsClient {
    /// Create a client against `base_url`, e.g. `http://localhost:5001/api`.
    ///
    /// Uses the default 10 second request timeout.
    pub fn new(base_url: &str) -> Result<Self, ApiClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client from the `NAIJAFIX_API_BASE_URL` environment
    /// variable, falling back to the local development server.
    pub fn from_env() -> Result<Self, ApiClientError> {
        let base_url = std::env::var("NAIJAFIX_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5001/api".to_string());
        Self::new(&base_url)
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiClientError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ApiClientError::setup(format!("Invalid base URL: {e}")))?;
        // Url::join drops the last path segment without this.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ApiClientError::setup(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    fn url(&self, path: &str) -> Result<Url, ApiClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiClientError::setup(format!("Invalid request path {path:?}: {e}")))
    }

    /// Send a request and unwrap the response envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, ApiClientError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiClientError::from_transport(&e, self.timeout))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiClientError::from_transport(&e, self.timeout))?;

        let Ok(envelope) = serde_json::from_slice::<Envelope<T>>(&bytes) else {
            return Err(ApiClientError::from_server(
                status.as_u16(),
                format!("Request failed with status {status}"),
                None,
            ));
        };

        if envelope.success {
            Ok(envelope)
        } else {
            let message = envelope
                .error
                .or(envelope.message)
                .unwrap_or_else(|| format!("Request failed with status {status}"));
            Err(ApiClientError::from_server(
                status.as_u16(),
                message,
                envelope.code,
            ))
        }
    }

    /// Like [`Self::execute`] but requires the envelope to carry data.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiClientError> {
        let envelope = self.execute(request).await?;
        envelope.data.ok_or_else(|| {
            ApiClientError::setup("Server response was missing the data field")
        })
    }

    async fn fetch_page(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<ReportPage, ApiClientError> {
        let envelope: Envelope<Vec<Report>> = self.execute(request).await?;
        Ok(ReportPage {
            reports: envelope.data.unwrap_or_default(),
            pagination: envelope.pagination,
        })
    }

    /// List reports with optional filters and pagination.
    pub async fn list(&self, filters: &ListFilters) -> Result<ReportPage, ApiClientError> {
        debug!(?filters, "GET /reports");
        let url = self.url("reports")?;
        self.fetch_page(self.http.get(url).query(filters)).await
    }

    /// Fetch a single report.
    pub async fn get(&self, id: &str) -> Result<Report, ApiClientError> {
        debug!(id, "GET /reports/{{id}}");
        let url = self.url(&format!("reports/{id}"))?;
        self.fetch(self.http.get(url)).await
    }

    /// Fetch one page of a user's reports.
    pub async fn get_by_user(
        &self,
        userid: &str,
        page: u64,
        limit: u64,
    ) -> Result<ReportPage, ApiClientError> {
        debug!(userid, page, limit, "GET /reports/user/{{userid}}");
        let url = self.url(&format!("reports/user/{userid}"))?;
        self.fetch_page(self.http.get(url).query(&[("page", page), ("limit", limit)]))
            .await
    }

    /// Fetch one page of a category's reports.
    pub async fn get_by_category(
        &self,
        category: &str,
        page: u64,
        limit: u64,
    ) -> Result<ReportPage, ApiClientError> {
        debug!(category, page, limit, "GET /reports/category/{{category}}");
        let url = self.url(&format!("reports/category/{category}"))?;
        self.fetch_page(self.http.get(url).query(&[("page", page), ("limit", limit)]))
            .await
    }

    /// Submit a new report.
    pub async fn create(&self, report: &CreateReportRequest) -> Result<Report, ApiClientError> {
        debug!(title = %report.title, category = %report.category, "POST /reports");
        let url = self.url("reports")?;
        self.fetch(self.http.post(url).json(report)).await
    }

    /// Replace a report's mutable fields.
    pub async fn update(
        &self,
        id: &str,
        update: &UpdateReportRequest,
    ) -> Result<Report, ApiClientError> {
        debug!(id, "PUT /reports/{{id}}");
        let url = self.url(&format!("reports/{id}"))?;
        self.fetch(self.http.put(url).json(update)).await
    }

    /// Change a report's status, optionally recording resolution notes.
    pub async fn update_status(
        &self,
        id: &str,
        status: &str,
        resolution_notes: Option<&str>,
    ) -> Result<Report, ApiClientError> {
        debug!(id, status, "PATCH /reports/{{id}}/status");
        let url = self.url(&format!("reports/{id}/status"))?;

        let mut body = json!({ "status": status });
        if let Some(notes) = resolution_notes {
            body["resolutionNotes"] = json!(notes);
        }

        self.fetch(self.http.patch(url).json(&body)).await
    }

    /// Delete a report.
    pub async fn delete(&self, id: &str) -> Result<(), ApiClientError> {
        debug!(id, "DELETE /reports/{{id}}");
        let url = self.url(&format!("reports/{id}"))?;
        let _: Envelope<serde_json::Value> = self.execute(self.http.delete(url)).await?;
        Ok(())
    }

    /// Fetch aggregate statistics.
    pub async fn stats(&self) -> Result<StatsSummary, ApiClientError> {
        debug!("GET /reports/stats/summary");
        let url = self.url("reports/stats/summary")?;
        self.fetch(self.http.get(url)).await
    }

    /// Fetch the health payload. This endpoint does not use the envelope.
    pub async fn health(&self) -> Result<Health, ApiClientError> {
        debug!("GET /health");
        let url = self.url("health")?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiClientError::from_transport(&e, self.timeout))?;

        response
            .json()
            .await
            .map_err(|e| ApiClientError::from_transport(&e, self.timeout))
    }

    /// Probe connectivity without surfacing an error.
    pub async fn check_connection(&self) -> ConnectionStatus {
        match self.health().await {
            Ok(health) => ConnectionStatus::Connected(health),
            Err(err) => ConnectionStatus::Disconnected(err.message),
        }
    }
}
