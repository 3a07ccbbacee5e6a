//! Error mapping helpers for the HTTP report gateway.

use http::StatusCode;

use crate::report::error::ExportError;

use super::http_utils::{extract_api_message, truncate_for_message};

const MAX_BODY_CHARS: usize = 500;

/// Checks if a status indicates the credentials were rejected.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

pub(super) fn map_http_error(operation: &str, status: StatusCode, body: &str) -> ExportError {
    let detail = extract_api_message(body)
        .unwrap_or_else(|| truncate_for_message(body.trim(), MAX_BODY_CHARS));
    let message = if detail.is_empty() {
        format!("{operation} failed")
    } else {
        format!("{operation} failed: {detail}")
    };

    if is_auth_failure(status) {
        ExportError::Authentication { message }
    } else if status == StatusCode::NOT_FOUND {
        ExportError::NotFound { message }
    } else {
        ExportError::Transport {
            status: Some(status.as_u16()),
            message,
        }
    }
}

pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> ExportError {
    ExportError::Transport {
        status: error.status().map(|status| status.as_u16()),
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_decode_error(operation: &str, error: &serde_json::Error) -> ExportError {
    ExportError::MalformedResponse {
        message: format!("{operation} returned an unexpected body: {error}"),
    }
}
