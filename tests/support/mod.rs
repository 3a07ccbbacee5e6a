//! Shared test utilities.

use camino::Utf8PathBuf;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Path of the report resources endpoint for cloud `demo`.
pub fn resources_path(report_id: &str) -> String {
    format!("/demo/resources/last_access_reports/{report_id}")
}

/// Creates a temporary directory for output files.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Returns the UTF-8 path of a temporary directory.
///
/// # Panics
///
/// Panics if the path is not valid UTF-8.
pub fn utf8_path(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .unwrap_or_else(|path| panic!("temporary path is not UTF-8: {}", path.display()))
}

/// Starts a Tokio runtime and a Wiremock server on it.
///
/// # Panics
///
/// Panics if the runtime cannot be created.
pub fn start_server() -> (Runtime, MockServer) {
    let runtime =
        Runtime::new().unwrap_or_else(|error| panic!("failed to start runtime: {error}"));
    let server = runtime.block_on(MockServer::start());
    (runtime, server)
}

/// Builds one resource entry as returned by the API.
pub fn resource(last_access: &str, public_id: &str) -> Value {
    json!({
        "last_access": last_access,
        "public_id": public_id,
        "secure_url": format!("https://res.example.com/demo/{public_id}.jpg"),
    })
}

/// Builds a page body with an optional continuation cursor.
pub fn page(resources: Vec<Value>, next_cursor: Option<&str>) -> Value {
    match next_cursor {
        Some(cursor) => json!({ "resources": resources, "next_cursor": cursor }),
        None => json!({ "resources": resources }),
    }
}
