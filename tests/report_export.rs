//! End-to-end export tests driving the library against a mock API.
//!
//! Each test serves report pages from Wiremock and exports them to a real
//! file inside a temporary directory.

mod support;

use std::time::Duration;

use camino::Utf8PathBuf;
use cld_lar::telemetry::test_support::RecordingSink;
use cld_lar::{
    ApiCredentials, ExportError, HttpReportGateway, ReportExporter, ReportId, TelemetryEvent,
};
use rstest::{fixture, rstest};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use support::{create_temp_dir, page, resource, resources_path, start_server, utf8_path};

struct ExportHarness {
    runtime: Runtime,
    server: MockServer,
    gateway: HttpReportGateway,
    output_dir: TempDir,
}

impl ExportHarness {
    fn serve_page(&self, cursor: Option<&str>, response: ResponseTemplate) {
        let endpoint = Mock::given(method("GET")).and(path(resources_path("rep-1")));
        let mock = match cursor {
            Some(value) => endpoint.and(query_param("next_cursor", value)),
            None => endpoint.and(query_param_is_missing("next_cursor")),
        };
        self.runtime
            .block_on(mock.respond_with(response).expect(1).mount(&self.server));
    }

    fn output_path(&self) -> Utf8PathBuf {
        utf8_path(&self.output_dir).join("report.csv")
    }

    fn export(&self, telemetry: &RecordingSink) -> Result<usize, ExportError> {
        let exporter = ReportExporter::new(&self.gateway)
            .with_page_size(2)?
            .with_telemetry(telemetry);
        let report_id = ReportId::new("rep-1")?;
        self.runtime
            .block_on(exporter.export_to_file(&report_id, &self.output_path()))
            .map(|summary| summary.rows)
    }

    fn read_output(&self) -> String {
        std::fs::read_to_string(self.output_path())
            .unwrap_or_else(|error| panic!("output file should exist: {error}"))
    }

    fn output_dir_entries(&self) -> Vec<String> {
        std::fs::read_dir(self.output_dir.path())
            .unwrap_or_else(|error| panic!("output dir should be readable: {error}"))
            .map(|entry| {
                entry
                    .unwrap_or_else(|error| panic!("dir entry should be readable: {error}"))
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }
}

#[fixture]
fn harness() -> ExportHarness {
    let (runtime, server) = start_server();
    let credentials = ApiCredentials::new("demo", "key", "secret")
        .unwrap_or_else(|error| panic!("credentials should be valid: {error}"));
    let gateway = HttpReportGateway::new(credentials, &server.uri(), Duration::from_secs(5))
        .unwrap_or_else(|error| panic!("gateway should be created: {error}"));
    ExportHarness {
        runtime,
        server,
        gateway,
        output_dir: create_temp_dir(),
    }
}

fn ok_page(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[rstest]
fn three_pages_are_merged_and_sorted_newest_first(harness: ExportHarness) {
    harness.serve_page(
        None,
        ok_page(page(
            vec![
                resource("2023-01-01T00:00:00Z", "first"),
                resource("2023-03-01T00:00:00Z", "second"),
            ],
            Some("c2"),
        )),
    );
    harness.serve_page(
        Some("c2"),
        ok_page(page(
            vec![
                resource("2023-01-01T00:00:00Z", "third"),
                resource("2023-11-05T14:22:00Z", "fourth"),
            ],
            Some("c3"),
        )),
    );
    harness.serve_page(
        Some("c3"),
        ok_page(page(vec![resource("2022-12-31T23:59:59Z", "fifth")], None)),
    );
    let telemetry = RecordingSink::default();

    let rows = harness
        .export(&telemetry)
        .unwrap_or_else(|error| panic!("export should succeed: {error}"));

    assert_eq!(rows, 5);
    assert_eq!(
        harness.read_output(),
        concat!(
            "last_access_date,public_id,secure_url\n",
            "11-05-2023,fourth,https://res.example.com/demo/fourth.jpg\n",
            "03-01-2023,second,https://res.example.com/demo/second.jpg\n",
            "01-01-2023,first,https://res.example.com/demo/first.jpg\n",
            "01-01-2023,third,https://res.example.com/demo/third.jpg\n",
            "12-31-2022,fifth,https://res.example.com/demo/fifth.jpg\n",
        )
    );
    assert_eq!(
        telemetry.take().last(),
        Some(&TelemetryEvent::ReportExported {
            report_id: "rep-1".to_owned(),
            pages: 3,
            rows: 5,
        })
    );
}

#[rstest]
#[case::server_error(ResponseTemplate::new(500).set_body_string("internal error"))]
#[case::malformed(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))]
fn failure_on_second_page_leaves_no_file(
    harness: ExportHarness,
    #[case] second_page: ResponseTemplate,
) {
    harness.serve_page(
        None,
        ok_page(page(
            vec![resource("2023-01-01T00:00:00Z", "first")],
            Some("c2"),
        )),
    );
    harness.serve_page(Some("c2"), second_page);
    let telemetry = RecordingSink::default();

    let result = harness.export(&telemetry);

    assert!(
        matches!(
            result,
            Err(ExportError::Transport {
                status: Some(500),
                ..
            } | ExportError::MalformedResponse { .. })
        ),
        "unexpected result: {result:?}"
    );
    assert!(
        harness.output_dir_entries().is_empty(),
        "no output should be left behind: {:?}",
        harness.output_dir_entries()
    );
    assert!(
        !telemetry
            .take()
            .iter()
            .any(|event| matches!(event, TelemetryEvent::ReportExported { .. })),
        "a failed export must not be reported as exported"
    );
}

#[rstest]
fn empty_report_writes_header_only(harness: ExportHarness) {
    harness.serve_page(None, ok_page(page(vec![], None)));

    let rows = harness
        .export(&RecordingSink::default())
        .unwrap_or_else(|error| panic!("export should succeed: {error}"));

    assert_eq!(rows, 0);
    assert_eq!(
        harness.read_output(),
        "last_access_date,public_id,secure_url\n"
    );
}

#[rstest]
fn fields_with_commas_and_quotes_are_quoted(harness: ExportHarness) {
    harness.serve_page(
        None,
        ok_page(page(
            vec![resource("2023-11-05T14:22:00Z", r#"sale, "final""#)],
            None,
        )),
    );

    harness
        .export(&RecordingSink::default())
        .unwrap_or_else(|error| panic!("export should succeed: {error}"));

    assert_eq!(
        harness.read_output(),
        concat!(
            "last_access_date,public_id,secure_url\n",
            r#"11-05-2023,"sale, ""final""","https://res.example.com/demo/sale, ""final"".jpg""#,
            "\n",
        )
    );
}
