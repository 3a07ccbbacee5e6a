//! CSV formatter for exported report resources.

use std::io::Write;

use crate::report::{ExportError, ReportResource};

use super::row::{CSV_HEADER, ExportedRow};

/// Writes the header row followed by one row per resource, then flushes.
///
/// Resources are written in the order given; callers sort beforehand. Fields
/// containing delimiters, quotes, or newlines are quoted per RFC 4180.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if serialisation or writing to the sink fails.
pub fn write_csv<W: Write>(sink: W, resources: &[ReportResource]) -> Result<usize, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);

    writer.write_record(CSV_HEADER).map_err(|e| csv_error(&e))?;
    for resource in resources {
        writer
            .serialize(ExportedRow::from(resource))
            .map_err(|e| csv_error(&e))?;
    }
    writer
        .flush()
        .map_err(|e| ExportError::io("failed to flush CSV output", &e))?;

    Ok(resources.len())
}

fn csv_error(error: &csv::Error) -> ExportError {
    ExportError::Io {
        message: format!("CSV write failed: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use rstest::rstest;

    use super::write_csv;
    use crate::report::ReportResource;

    fn make_resource(public_id: &str, timestamp: &str, url: &str) -> ReportResource {
        ReportResource {
            last_access: timestamp
                .parse::<DateTime<Utc>>()
                .expect("timestamp should parse"),
            public_id: public_id.to_owned(),
            secure_url: url.to_owned(),
        }
    }

    fn write_to_string(resources: &[ReportResource]) -> (usize, String) {
        let mut buffer = Vec::new();
        let count = write_csv(&mut buffer, resources).expect("should write CSV");
        (count, String::from_utf8(buffer).expect("valid UTF-8"))
    }

    #[rstest]
    fn empty_report_writes_header_only() {
        let (count, output) = write_to_string(&[]);

        assert_eq!(count, 0);
        assert_eq!(output, "last_access_date,public_id,secure_url\n");
    }

    #[rstest]
    fn writes_rows_in_given_order_with_formatted_dates() {
        let resources = vec![
            make_resource("b", "2023-11-05T14:22:00Z", "https://x/b"),
            make_resource("a", "2023-01-02T00:00:00Z", "https://x/a"),
        ];

        let (count, output) = write_to_string(&resources);

        assert_eq!(count, 2);
        assert_eq!(
            output,
            concat!(
                "last_access_date,public_id,secure_url\n",
                "11-05-2023,b,https://x/b\n",
                "01-02-2023,a,https://x/a\n",
            )
        );
    }

    #[rstest]
    #[case::comma("folder/a,b", "\"folder/a,b\"")]
    #[case::quote("say \"hi\"", "\"say \"\"hi\"\"\"")]
    #[case::newline("line\nbreak", "\"line\nbreak\"")]
    fn special_characters_are_quoted(#[case] public_id: &str, #[case] expected_field: &str) {
        let resources = vec![make_resource(public_id, "2023-11-05T14:22:00Z", "https://x/y")];

        let (_, output) = write_to_string(&resources);

        let expected_row = format!("11-05-2023,{expected_field},https://x/y\n");
        assert!(
            output.ends_with(&expected_row),
            "expected row {expected_row:?} in {output:?}"
        );
    }
}
