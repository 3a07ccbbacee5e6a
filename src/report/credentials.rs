//! API credentials passed explicitly to the HTTP gateway.

use std::fmt;

use serde::Serialize;

use super::error::ExportError;

/// Cloud account credentials used for HTTP basic authentication.
///
/// The serialised form matches the saved credentials file:
/// `{"cloud_name": "...", "api_key": "...", "api_secret": "..."}`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ApiCredentials {
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl ApiCredentials {
    /// Validates that every field is non-blank and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingCredentials`] naming each blank field.
    pub fn new(
        cloud_name: impl AsRef<str>,
        api_key: impl AsRef<str>,
        api_secret: impl AsRef<str>,
    ) -> Result<Self, ExportError> {
        let fields = [
            ("cloud name", cloud_name.as_ref().trim()),
            ("API key", api_key.as_ref().trim()),
            ("API secret", api_secret.as_ref().trim()),
        ];
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(label, _)| *label)
            .collect();
        if !missing.is_empty() {
            return Err(missing_credentials(&missing));
        }

        let [(_, cloud), (_, key), (_, secret)] = fields;
        Ok(Self {
            cloud_name: cloud.to_owned(),
            api_key: key.to_owned(),
            api_secret: secret.to_owned(),
        })
    }

    /// Borrow the cloud name.
    #[must_use]
    pub const fn cloud_name(&self) -> &str {
        self.cloud_name.as_str()
    }

    /// Borrow the API key.
    #[must_use]
    pub const fn api_key(&self) -> &str {
        self.api_key.as_str()
    }

    /// Borrow the API secret.
    #[must_use]
    pub const fn api_secret(&self) -> &str {
        self.api_secret.as_str()
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Builds the error reported when credential fields are missing.
pub(crate) fn missing_credentials(missing: &[&str]) -> ExportError {
    ExportError::MissingCredentials {
        message: format!(
            "missing credentials: {} (use --configure, CLD_* environment variables, or CLI flags)",
            missing.join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::ApiCredentials;
    use crate::report::error::ExportError;

    #[rstest]
    fn new_trims_every_field() {
        let credentials =
            ApiCredentials::new(" demo ", " key ", " secret ").expect("credentials are complete");

        assert_eq!(credentials.cloud_name(), "demo");
        assert_eq!(credentials.api_key(), "key");
        assert_eq!(credentials.api_secret(), "secret");
    }

    #[rstest]
    fn new_names_each_missing_field() {
        let result = ApiCredentials::new("demo", "", " ");

        match result {
            Err(ExportError::MissingCredentials { message }) => {
                assert!(message.contains("API key"), "message: {message}");
                assert!(message.contains("API secret"), "message: {message}");
                assert!(!message.contains("cloud name"), "message: {message}");
            }
            other => panic!("expected MissingCredentials, got {other:?}"),
        }
    }

    #[rstest]
    fn debug_output_redacts_secret() {
        let credentials =
            ApiCredentials::new("demo", "key", "hunter2").expect("credentials are complete");

        let rendered = format!("{credentials:?}");

        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
