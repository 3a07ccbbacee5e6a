//! Export a report's resources to a CSV file.

use std::io;

use cld_lar::{
    ApiCredentials, CldConfig, ExportError, ExportSummary, HttpReportGateway, ReportExporter,
    ReportId, TracingTelemetrySink,
};

use super::output::write_export_summary;

/// Exports the configured report and prints a summary to stdout.
///
/// # Errors
///
/// Returns [`ExportError::Configuration`] when no report identifier is
/// configured, [`ExportError::MissingCredentials`] when credentials cannot be
/// resolved, and any error raised while fetching or writing the report.
pub async fn run(config: &CldConfig) -> Result<(), ExportError> {
    let (report_id, summary) = export(config).await?;
    write_export_summary(&mut io::stdout().lock(), &report_id, &summary)
}

/// Exports the configured report to its output file.
///
/// # Errors
///
/// See [`run`].
pub async fn export(config: &CldConfig) -> Result<(ReportId, ExportSummary), ExportError> {
    let report_id = config.require_report_id()?;
    let credentials = resolve_credentials(config)?;

    let gateway = HttpReportGateway::new(credentials, config.api_base(), config.timeout())?;
    let telemetry = TracingTelemetrySink;
    let exporter = ReportExporter::new(&gateway)
        .with_page_size(config.page_size)?
        .with_telemetry(&telemetry);

    let output_path = config.output_path(&report_id);
    let summary = exporter.export_to_file(&report_id, &output_path).await?;
    Ok((report_id, summary))
}

/// Resolves credentials, reading the saved file only when flags and the
/// environment leave a field unset.
fn resolve_credentials(config: &CldConfig) -> Result<ApiCredentials, ExportError> {
    config
        .resolve_credentials(None)
        .or_else(|_| config.resolve_credentials(load_saved_credentials(config)?.as_ref()))
}

/// Loads the saved credentials file, if one can be located.
///
/// A missing home directory is not fatal here: credentials may still come
/// from flags or the environment.
fn load_saved_credentials(config: &CldConfig) -> Result<Option<ApiCredentials>, ExportError> {
    match config.credentials_store() {
        Ok(store) => Ok(store.load()?),
        Err(error) => {
            tracing::debug!(%error, "skipping saved credentials");
            Ok(None)
        }
    }
}
