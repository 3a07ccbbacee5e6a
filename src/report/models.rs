//! Report identity, page request, and page response types.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::error::ExportError;

/// Largest page size the listing endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Page size used when the caller does not override it.
pub const DEFAULT_PAGE_SIZE: u32 = MAX_PAGE_SIZE;

/// Opaque report identifier returned by the report-creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportId(String);

impl ReportId {
    /// Validates that the identifier is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when the supplied string is
    /// blank.
    pub fn new(value: impl AsRef<str>) -> Result<Self, ExportError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ExportError::Configuration {
                message: "report identifier must not be blank".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the identifier.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for ReportId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resource row of a last-access report.
///
/// The timestamp is parsed while the page is decoded, so a resource that
/// exists in memory always carries a valid `last_access`. RFC 3339 values
/// keep their offset; ISO-8601 date-times without an offset are read as UTC.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportResource {
    /// When the asset was last delivered.
    #[serde(deserialize_with = "deserialize_last_access")]
    pub last_access: DateTime<Utc>,
    /// Asset identifier, unique within one report.
    pub public_id: String,
    /// HTTPS delivery URL of the asset.
    pub secure_url: String,
}

fn deserialize_last_access<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_last_access(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid last_access timestamp '{raw}'"))
    })
}

fn parse_last_access(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// One response page from the report-resources endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageResult {
    /// Resources on this page, in server order.
    pub resources: Vec<ReportResource>,
    /// Continuation token; present when more pages exist.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl PageResult {
    /// Returns the continuation cursor, treating an empty string as absent.
    #[must_use]
    pub fn continuation(&self) -> Option<&str> {
        self.next_cursor
            .as_deref()
            .filter(|cursor| !cursor.is_empty())
    }
}

/// Parameters for fetching one page of report resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Report being listed.
    pub report_id: ReportId,
    /// Maximum number of resources to return.
    pub max_results: u32,
    /// Cursor from the previous page; `None` requests the first page.
    pub next_cursor: Option<String>,
}
