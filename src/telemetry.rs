//! Export lifecycle telemetry events and sinks.
//!
//! Events describe how an export progressed (pages fetched, rows written) so
//! that operators can diagnose slow or partial reports. Nothing is
//! transmitted anywhere; the tracing sink forwards events to the configured
//! `tracing` subscriber.

use serde::Serialize;

/// A structured telemetry event emitted during an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// One page of report resources was received.
    PageFetched {
        /// Report being exported.
        report_id: String,
        /// 1-based page number within this export.
        page: u32,
        /// Number of resources on the page.
        resources: usize,
    },
    /// All rows of a report were written to the sink.
    ReportExported {
        /// Report that was exported.
        report_id: String,
        /// Number of pages fetched.
        pages: u32,
        /// Number of data rows written.
        rows: usize,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Forwards telemetry events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        match event {
            TelemetryEvent::PageFetched {
                report_id,
                page,
                resources,
            } => tracing::debug!(%report_id, page, resources, "report page fetched"),
            TelemetryEvent::ReportExported {
                report_id,
                pages,
                rows,
            } => tracing::info!(%report_id, pages, rows, "report exported"),
        }
    }
}

/// Telemetry helpers for tests.
#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use std::sync::{Mutex, PoisonError};

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that keeps every event for later inspection.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingSink {
        /// Drains and returns the events recorded so far.
        #[must_use]
        pub fn take(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .drain(..)
                .collect()
        }
    }

    impl TelemetrySink for RecordingSink {
        fn record(&self, event: TelemetryEvent) {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event);
        }
    }
}
