//! Repository layer.

pub mod report;

pub use report::{
    CategoryBreakdown, Page, ReportFilter, ReportRepository, StateCount, page_count,
};
