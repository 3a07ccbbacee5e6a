//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use camino::Utf8Path;
use cld_lar::{ExportError, ExportSummary, ReportId};

/// Writes the export summary line to the given writer.
pub fn write_export_summary<W: Write>(
    writer: &mut W,
    report_id: &ReportId,
    summary: &ExportSummary,
) -> Result<(), ExportError> {
    writeln!(
        writer,
        "Exported {} resources from report {report_id} to {}",
        summary.rows, summary.path
    )
    .map_err(|e| io_error(&e))
}

/// Writes the confirmation shown after credentials were saved.
pub fn write_saved_credentials<W: Write>(
    writer: &mut W,
    path: &Utf8Path,
) -> Result<(), ExportError> {
    writeln!(writer, "Credentials saved to {path}").map_err(|e| io_error(&e))
}

/// Converts an I/O error to an [`ExportError::Io`].
pub(crate) fn io_error(error: &io::Error) -> ExportError {
    ExportError::io("failed to write to the terminal", error)
}

#[cfg(test)]
mod tests {
    use camino::{Utf8Path, Utf8PathBuf};
    use cld_lar::{ExportSummary, ReportId};

    use super::{write_export_summary, write_saved_credentials};

    #[test]
    fn write_export_summary_reports_rows_and_path() {
        let report_id = ReportId::new("rep-42").expect("report id should be valid");
        let summary = ExportSummary {
            rows: 1250,
            path: Utf8PathBuf::from("reports/last_access_report_rep-42.csv"),
        };

        let mut buffer = Vec::new();
        write_export_summary(&mut buffer, &report_id, &summary).expect("should write summary");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert_eq!(
            output,
            "Exported 1250 resources from report rep-42 to reports/last_access_report_rep-42.csv\n"
        );
    }

    #[test]
    fn write_saved_credentials_names_the_file() {
        let mut buffer = Vec::new();
        write_saved_credentials(&mut buffer, Utf8Path::new("/home/op/.cld_lar_config.json"))
            .expect("should write confirmation");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert!(
            output.contains("Credentials saved to /home/op/.cld_lar_config.json"),
            "unexpected output: {output}"
        );
    }
}
