//! Last-access report retrieval and export.
//!
//! A report lists every asset that was delivered within a date range along
//! with when it was last accessed. This module pages through a report's
//! resources via a [`ReportGateway`], merges the pages, orders them by
//! recency, and writes them as CSV. Errors are mapped into [`ExportError`]
//! variants so callers can tell rejected credentials and unknown reports
//! apart from transport failures.

pub mod credentials;
pub mod error;
pub mod exporter;
pub mod gateway;
pub mod models;

pub use credentials::ApiCredentials;
pub use error::ExportError;
pub use exporter::{ExportJob, ExportSummary, ReportExporter};
pub use gateway::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS, HttpReportGateway, ReportGateway};
pub use models::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, PageResult, ReportId, ReportResource,
};

#[cfg(test)]
pub use gateway::MockReportGateway;
