//! Cld-lar library crate for exporting last-access reports.
//!
//! The library pages through the resources of a media API "last access"
//! report, orders them by when they were last accessed, and writes them to a
//! CSV file. Failures surface as [`ExportError`] values that can be
//! displayed in the CLI, and no partial output is ever left behind.

pub mod config;
pub mod export;
pub mod persistence;
pub mod report;
pub mod telemetry;

pub use config::{CldConfig, OperationMode};
pub use persistence::{CredentialsStore, PersistenceError};
pub use report::{
    ApiCredentials, ExportError, ExportSummary, HttpReportGateway, PageRequest, PageResult,
    ReportExporter, ReportGateway, ReportId, ReportResource,
};
pub use telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink, TracingTelemetrySink};
