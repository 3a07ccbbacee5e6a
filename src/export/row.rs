//! CSV row model for exported report resources.

use serde::Serialize;

use crate::report::ReportResource;

/// Column names of the exported CSV, in output order.
pub const CSV_HEADER: [&str; 3] = ["last_access_date", "public_id", "secure_url"];

/// Display form of `last_access` in the exported file.
pub const LAST_ACCESS_DATE_FORMAT: &str = "%m-%d-%Y";

/// One CSV row prepared from a [`ReportResource`].
///
/// Field order matches [`CSV_HEADER`].
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExportedRow {
    /// `last_access` rendered as `MM-DD-YYYY` (UTC).
    pub last_access_date: String,
    /// Asset identifier.
    pub public_id: String,
    /// HTTPS delivery URL.
    pub secure_url: String,
}

impl From<&ReportResource> for ExportedRow {
    fn from(resource: &ReportResource) -> Self {
        Self {
            last_access_date: resource
                .last_access
                .format(LAST_ACCESS_DATE_FORMAT)
                .to_string(),
            public_id: resource.public_id.clone(),
            secure_url: resource.secure_url.clone(),
        }
    }
}
