//! HTTP client for the NaijaFix API.
//!
//! This crate wraps every REST endpoint in a typed call and normalizes
//! transport and server errors into one [`ApiClientError`] shape. It also
//! carries the page-level derivations the browser application computes from
//! fetched data (recent reports, category/state distributions, resolution
//! rate).
//!
//! The crate deliberately depends only on the wire format, not on the server
//! crates, so it can be embedded in tools that talk to a remote deployment.

pub mod error;
pub mod pages;
pub mod reports;
pub mod types;

pub use error::ApiClientError;
pub use reports::ReportsClient;
pub use types::{
    CategoryBreakdown, ConnectionStatus, CoordinatesInput, CreateReportRequest, Health,
    ListFilters, Location, LocationInput, Pagination, Report, ReportPage, StateCount,
    StatsSummary, UpdateReportRequest,
};
