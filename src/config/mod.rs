//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.cld.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `CLD_REPORT_ID`, `CLD_API_KEY`, and so on
//! 4. **Command-line arguments** – `--report-id`/`-r`, `--api-key`/`-k`, ...
//!
//! Credentials that are still missing after these layers fall back to the
//! legacy `API_KEY` / `API_SECRET` environment variables and then to the
//! saved credentials file written by `--configure`.
//!
//! # Configuration File
//!
//! ```toml
//! cloud_name = "demo"
//! api_key = "1234"
//! api_secret = "abcd"
//! output_dir = "reports"
//! page_size = 250
//! ```

use std::env;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::persistence::CredentialsStore;
use crate::report::credentials::missing_credentials;
use crate::report::{
    ApiCredentials, DEFAULT_API_BASE, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS, ExportError,
    MAX_PAGE_SIZE, ReportId,
};

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Prompt for credentials and save them.
    Configure,
    /// Export a report's resources to CSV.
    ExportReport,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `CLD_CLOUD_NAME` or `--cloud-name`: Cloud account name
/// - `CLD_API_KEY`, `API_KEY`, or `--api-key`: API key
/// - `CLD_API_SECRET`, `API_SECRET`, or `--api-secret`: API secret
/// - `CLD_REPORT_ID` or `--report-id`: Report to export
/// - `CLD_OUTPUT_DIR` or `--output-dir`: Directory for the CSV file
///
/// # Example
///
/// ```no_run
/// use cld_lar::CldConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = CldConfig::load().expect("failed to load configuration");
/// let report_id = config.require_report_id().expect("report id required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "CLD",
    discovery(
        dotfile_name = ".cld.toml",
        config_file_name = "cld.toml",
        app_name = "cld"
    )
)]
pub struct CldConfig {
    /// Cloud account name used in API paths.
    ///
    /// Can be provided via:
    /// - CLI: `--cloud-name <NAME>` or `-c <NAME>`
    /// - Environment: `CLD_CLOUD_NAME`
    /// - Config file: `cloud_name = "..."`
    #[ortho_config(cli_short = 'c')]
    pub cloud_name: Option<String>,

    /// API key for basic authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--api-key <KEY>` or `-k <KEY>`
    /// - Environment: `CLD_API_KEY` or `API_KEY` (legacy)
    /// - Config file: `api_key = "..."`
    #[ortho_config(cli_short = 'k')]
    pub api_key: Option<String>,

    /// API secret for basic authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--api-secret <SECRET>` or `-s <SECRET>`
    /// - Environment: `CLD_API_SECRET` or `API_SECRET` (legacy)
    /// - Config file: `api_secret = "..."`
    #[ortho_config(cli_short = 's')]
    pub api_secret: Option<String>,

    /// Base URL of the media API. Defaults to
    /// `https://api.cloudinary.com/v1_1`.
    #[ortho_config()]
    pub api_base: Option<String>,

    /// Identifier of the report to export.
    ///
    /// Can be provided via:
    /// - CLI: `--report-id <ID>` or `-r <ID>`
    /// - Environment: `CLD_REPORT_ID`
    #[ortho_config(cli_short = 'r')]
    pub report_id: Option<String>,

    /// Directory the CSV file is written to. Defaults to the current
    /// directory.
    #[ortho_config(cli_short = 'd')]
    pub output_dir: Option<String>,

    /// CSV file name. Defaults to `last_access_report_<report id>.csv`.
    #[ortho_config(cli_short = 'o')]
    pub output_file: Option<String>,

    /// Number of resources requested per page (1 to 500).
    #[ortho_config()]
    pub page_size: u32,

    /// Per-request HTTP timeout, in seconds.
    #[ortho_config()]
    pub timeout_seconds: u64,

    /// Location of the saved credentials file. Defaults to
    /// `~/.cld_lar_config.json`.
    #[ortho_config()]
    pub credentials_path: Option<String>,

    /// Prompts for credentials, saves them, and exits.
    ///
    /// Can be provided via:
    /// - CLI: `--configure`
    /// - Config file: `configure = true`
    #[ortho_config()]
    pub configure: bool,
}

impl Default for CldConfig {
    fn default() -> Self {
        Self {
            cloud_name: None,
            api_key: None,
            api_secret: None,
            api_base: None,
            report_id: None,
            output_dir: None,
            output_file: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            credentials_path: None,
            configure: false,
        }
    }
}

impl CldConfig {
    /// Determines the operation mode based on provided configuration.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.configure {
            OperationMode::Configure
        } else {
            OperationMode::ExportReport
        }
    }

    /// Checks that numeric settings are within range.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when `page_size` is outside
    /// 1..=500 or `timeout_seconds` is zero.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ExportError::Configuration {
                message: format!(
                    "page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                    self.page_size
                ),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ExportError::Configuration {
                message: "timeout must be at least one second".to_owned(),
            });
        }
        Ok(())
    }

    /// Returns the report identifier or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when no identifier is
    /// configured or it is blank.
    pub fn require_report_id(&self) -> Result<ReportId, ExportError> {
        let value = self
            .report_id
            .as_deref()
            .ok_or_else(|| ExportError::Configuration {
                message: "report identifier is required (use --report-id or -r)".to_owned(),
            })?;
        ReportId::new(value)
    }

    /// Resolves complete credentials.
    ///
    /// Each field is taken from the merged configuration when present,
    /// then from the legacy `API_KEY` / `API_SECRET` environment variables,
    /// then from `saved`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingCredentials`] naming every field that no
    /// source provides.
    pub fn resolve_credentials(
        &self,
        saved: Option<&ApiCredentials>,
    ) -> Result<ApiCredentials, ExportError> {
        let cloud_name = first_present([
            self.cloud_name.clone(),
            saved.map(|c| c.cloud_name().to_owned()),
        ]);
        let api_key = first_present([
            self.api_key.clone(),
            env::var("API_KEY").ok(),
            saved.map(|c| c.api_key().to_owned()),
        ]);
        let api_secret = first_present([
            self.api_secret.clone(),
            env::var("API_SECRET").ok(),
            saved.map(|c| c.api_secret().to_owned()),
        ]);

        match (cloud_name, api_key, api_secret) {
            (Some(cloud), Some(key), Some(secret)) => ApiCredentials::new(cloud, key, secret),
            (cloud, key, secret) => {
                let missing: Vec<&str> = [
                    (cloud.is_none(), "cloud name"),
                    (key.is_none(), "API key"),
                    (secret.is_none(), "API secret"),
                ]
                .into_iter()
                .filter_map(|(is_missing, label)| is_missing.then_some(label))
                .collect();
                Err(missing_credentials(&missing))
            }
        }
    }

    /// Returns the configured API base URL or the default.
    #[must_use]
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// Returns the per-request HTTP timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Builds the CSV output path for `report_id`.
    #[must_use]
    pub fn output_path(&self, report_id: &ReportId) -> Utf8PathBuf {
        let dir = Utf8PathBuf::from(self.output_dir.as_deref().unwrap_or("."));
        let file_name = self.output_file.clone().unwrap_or_else(|| {
            format!(
                "last_access_report_{}.csv",
                sanitize_segment(report_id.as_str())
            )
        });
        dir.join(file_name)
    }

    /// Returns the saved credentials store for this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when no path is configured and
    /// the home directory cannot be determined.
    pub fn credentials_store(&self) -> Result<CredentialsStore, ExportError> {
        match self.credentials_path.as_deref() {
            Some(path) => Ok(CredentialsStore::new(path)),
            None => Ok(CredentialsStore::at_default_location()?),
        }
    }
}

fn first_present<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}

fn sanitize_segment(segment: &str) -> String {
    const fn is_safe_for_filename(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
    }

    segment
        .chars()
        .map(|ch| if is_safe_for_filename(ch) { ch } else { '-' })
        .collect()
}

#[cfg(test)]
mod tests;
