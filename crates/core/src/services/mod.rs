//! Business logic services.

pub mod report;

pub use report::{ReportService, StatsSummary};
