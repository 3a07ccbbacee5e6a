//! Paginated fetch, merge, and CSV export of a report's resources.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};

use crate::export::{StagedFile, sort_by_recency, write_csv};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::error::ExportError;
use super::gateway::ReportGateway;
use super::models::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, PageResult, ReportId, ReportResource,
};

/// In-memory state for one export run.
///
/// Holds the resources accumulated so far, in page order then within-page
/// order, and the cursor for the next request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    report_id: ReportId,
    accumulated: Vec<ReportResource>,
    cursor: Option<String>,
    pages: u32,
}

impl ExportJob {
    /// Starts a job positioned before the first page.
    #[must_use]
    pub const fn new(report_id: ReportId) -> Self {
        Self {
            report_id,
            accumulated: Vec::new(),
            cursor: None,
            pages: 0,
        }
    }

    /// Describes the next page to request.
    #[must_use]
    pub fn next_request(&self, max_results: u32) -> PageRequest {
        PageRequest {
            report_id: self.report_id.clone(),
            max_results,
            next_cursor: self.cursor.clone(),
        }
    }

    /// Appends a page and advances the cursor.
    ///
    /// Returns `true` when the page carries a non-empty continuation cursor.
    pub fn absorb(&mut self, page: PageResult) -> bool {
        self.cursor = page.continuation().map(ToOwned::to_owned);
        self.accumulated.extend(page.resources);
        self.pages = self.pages.saturating_add(1);
        self.cursor.is_some()
    }

    /// Returns the number of pages absorbed.
    #[must_use]
    pub const fn pages(&self) -> u32 {
        self.pages
    }

    /// Returns the resources accumulated so far.
    #[must_use]
    pub fn resources(&self) -> &[ReportResource] {
        &self.accumulated
    }

    /// Consumes the job, returning the accumulated resources.
    #[must_use]
    pub fn into_resources(self) -> Vec<ReportResource> {
        self.accumulated
    }
}

/// Outcome of exporting a report to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of data rows written (header excluded).
    pub rows: usize,
    /// Path of the committed CSV file.
    pub path: Utf8PathBuf,
}

/// Retrieves every resource referenced by a report and writes them as CSV,
/// most recently accessed first.
pub struct ReportExporter<'a, Gateway>
where
    Gateway: ReportGateway + ?Sized,
{
    gateway: &'a Gateway,
    page_size: u32,
    telemetry: &'a dyn TelemetrySink,
}

impl<'a, Gateway> ReportExporter<'a, Gateway>
where
    Gateway: ReportGateway + ?Sized,
{
    /// Creates an exporter using the default page size and no telemetry.
    #[must_use]
    pub const fn new(gateway: &'a Gateway) -> Self {
        Self {
            gateway,
            page_size: DEFAULT_PAGE_SIZE,
            telemetry: &NoopTelemetrySink,
        }
    }

    /// Overrides the number of resources requested per page.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when `page_size` is zero or
    /// exceeds [`MAX_PAGE_SIZE`].
    pub fn with_page_size(mut self, page_size: u32) -> Result<Self, ExportError> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ExportError::Configuration {
                message: format!(
                    "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
                ),
            });
        }
        self.page_size = page_size;
        Ok(self)
    }

    /// Routes export lifecycle events to `telemetry`.
    #[must_use]
    pub const fn with_telemetry(mut self, telemetry: &'a dyn TelemetrySink) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Fetches every page of the report, one request at a time.
    ///
    /// Resources are returned in the order received. Pagination stops when
    /// a page arrives without a continuation cursor.
    ///
    /// # Errors
    ///
    /// Propagates the first gateway failure; no further pages are requested.
    pub async fn collect(&self, report_id: &ReportId) -> Result<ExportJob, ExportError> {
        let mut job = ExportJob::new(report_id.clone());
        loop {
            let request = job.next_request(self.page_size);
            let page = self.gateway.fetch_page(&request).await?;
            let page_len = page.resources.len();
            let has_more = job.absorb(page);
            self.telemetry.record(TelemetryEvent::PageFetched {
                report_id: report_id.to_string(),
                page: job.pages(),
                resources: page_len,
            });
            if !has_more {
                return Ok(job);
            }
        }
    }

    /// Exports the report to `sink` and returns the number of rows written.
    ///
    /// Nothing is written to the sink until every page has been fetched, so
    /// a failed export leaves the sink untouched.
    ///
    /// # Errors
    ///
    /// Returns the gateway error that aborted pagination, or
    /// [`ExportError::Io`] when writing to the sink fails.
    pub async fn export<W: Write>(
        &self,
        report_id: &ReportId,
        sink: W,
    ) -> Result<usize, ExportError> {
        let job = self.collect(report_id).await?;
        let pages = job.pages();
        let mut resources = job.into_resources();
        sort_by_recency(&mut resources);

        let rows = write_csv(sink, &resources)?;
        self.telemetry.record(TelemetryEvent::ReportExported {
            report_id: report_id.to_string(),
            pages,
            rows,
        });
        Ok(rows)
    }

    /// Exports the report to a CSV file at `path`.
    ///
    /// The file only appears once the export has fully succeeded; on any
    /// failure no file is left at `path`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`export`](Self::export), plus
    /// [`ExportError::Io`] when the file cannot be created or moved into
    /// place.
    pub async fn export_to_file(
        &self,
        report_id: &ReportId,
        path: &Utf8Path,
    ) -> Result<ExportSummary, ExportError> {
        let mut staged = StagedFile::new(path)?;
        let rows = self.export(report_id, &mut staged).await?;
        let committed = staged.commit()?;
        Ok(ExportSummary {
            rows,
            path: committed,
        })
    }
}

#[cfg(test)]
#[path = "exporter_tests.rs"]
mod tests;
