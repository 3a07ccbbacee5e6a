//! Gateways for listing report resources.
//!
//! The trait seam lets the exporter be driven by a mock in tests while the
//! reqwest implementation handles real HTTP requests.

mod client;
mod error_mapping;
mod http_utils;

pub use client::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS, HttpReportGateway};

use async_trait::async_trait;

use super::error::ExportError;
use super::models::{PageRequest, PageResult};

/// Gateway that can fetch one page of report resources.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportGateway: Send + Sync {
    /// Fetch the page described by `request`.
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult, ExportError>;
}
