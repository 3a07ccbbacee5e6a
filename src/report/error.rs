//! Error types exposed by the report export layer.

use thiserror::Error;

/// Errors surfaced while resolving configuration, talking to the media API,
/// or writing the exported report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportError {
    /// The API rejected the supplied credentials.
    #[error("API rejected the credentials: {message} (re-check the cloud name, API key, and API secret)")]
    Authentication {
        /// Error detail returned with the 401/403 response.
        message: String,
    },

    /// The report identifier is unknown to the API.
    #[error("report not found: {message}")]
    NotFound {
        /// Error detail returned with the 404 response.
        message: String,
    },

    /// Any other failure status or a network-level failure.
    #[error("{}", transport_summary(.status.as_ref().copied(), .message))]
    Transport {
        /// HTTP status code when a response was received.
        status: Option<u16>,
        /// Response body or transport error detail.
        message: String,
    },

    /// A page body did not match the expected shape.
    #[error("malformed API response: {message}")]
    MalformedResponse {
        /// Decoding failure detail.
        message: String,
    },

    /// No complete set of credentials could be resolved.
    #[error("{message}")]
    MissingCredentials {
        /// Which credential fields were missing.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

fn transport_summary(status: Option<u16>, message: &str) -> String {
    status.map_or_else(
        || format!("network error talking to the API: {message}"),
        |code| format!("API request failed with status {code}: {message}"),
    )
}

impl ExportError {
    /// Builds an [`ExportError::Io`] from a standard I/O error with context.
    #[must_use]
    pub fn io(context: &str, error: &std::io::Error) -> Self {
        Self::Io {
            message: format!("{context}: {error}"),
        }
    }
}
