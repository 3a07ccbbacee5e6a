//! Cld CLI entrypoint for last-access report export.

use std::io::{self, Write};
use std::process::ExitCode;

use cld_lar::{CldConfig, ExportError, OperationMode};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "cld failed");
            if writeln!(io::stderr().lock(), "Error: {error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ExportError> {
    let config = load_config()?;

    match config.operation_mode() {
        OperationMode::Configure => cli::configure::run(&config),
        OperationMode::ExportReport => cli::export_report::run(&config).await,
    }
}

/// Loads and validates configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ExportError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files, or when a numeric setting is out
/// of range.
fn load_config() -> Result<CldConfig, ExportError> {
    let config = CldConfig::load().map_err(|error| ExportError::Configuration {
        message: error.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Installs a stderr log subscriber filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
