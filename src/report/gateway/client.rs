//! reqwest-backed gateway for the report-resources endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::report::credentials::ApiCredentials;
use crate::report::error::ExportError;
use crate::report::models::{PageRequest, PageResult, ReportId};

use super::ReportGateway;
use super::error_mapping::{map_decode_error, map_http_error, map_transport_error};

/// Default base URL of the media API.
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const OPERATION: &str = "list report resources";

/// Gateway that lists report resources over HTTPS with basic authentication.
#[derive(Debug, Clone)]
pub struct HttpReportGateway {
    client: Client,
    api_base: Url,
    credentials: ApiCredentials,
}

impl HttpReportGateway {
    /// Creates a gateway for the given credentials and API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when the base URL cannot be
    /// parsed or cannot carry path segments, or when the HTTP client cannot
    /// be built.
    pub fn new(
        credentials: ApiCredentials,
        api_base: &str,
        timeout: Duration,
    ) -> Result<Self, ExportError> {
        let parsed = Url::parse(api_base).map_err(|error| ExportError::Configuration {
            message: format!("API base URL '{api_base}' is invalid: {error}"),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ExportError::Configuration {
                message: format!("API base URL '{api_base}' cannot be used as a base"),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ExportError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;

        Ok(Self {
            client,
            api_base: parsed,
            credentials,
        })
    }

    /// Builds the listing URL for one page.
    ///
    /// The cursor parameter is omitted entirely for the first page.
    fn page_url(&self, request: &PageRequest) -> Result<Url, ExportError> {
        let mut url = self.resources_url(&request.report_id)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("max_results", &request.max_results.to_string());
            if let Some(cursor) = request.next_cursor.as_deref() {
                query.append_pair("next_cursor", cursor);
            }
        }
        Ok(url)
    }

    fn resources_url(&self, report_id: &ReportId) -> Result<Url, ExportError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| ExportError::Configuration {
                message: format!("API base URL '{}' cannot be used as a base", self.api_base),
            })?
            .pop_if_empty()
            .extend([
                self.credentials.cloud_name(),
                "resources",
                "last_access_reports",
                report_id.as_str(),
            ]);
        Ok(url)
    }
}

#[async_trait]
impl ReportGateway for HttpReportGateway {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult, ExportError> {
        let url = self.page_url(request)?;
        tracing::debug!(
            report_id = %request.report_id,
            has_cursor = request.next_cursor.is_some(),
            "requesting report page"
        );

        let response = self
            .client
            .get(url)
            .basic_auth(
                self.credentials.api_key(),
                Some(self.credentials.api_secret()),
            )
            .send()
            .await
            .map_err(|error| map_transport_error(OPERATION, &error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| {
                "(failed to read error response body)".to_owned()
            });
            tracing::warn!(report_id = %request.report_id, %status, "report page request failed");
            return Err(map_http_error(OPERATION, status, &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(OPERATION, &error))?;
        serde_json::from_slice::<PageResult>(&bytes)
            .map_err(|error| map_decode_error(OPERATION, &error))
    }
}
