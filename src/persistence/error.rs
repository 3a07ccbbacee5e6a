//! Error types for local credential persistence.

use thiserror::Error;

use crate::report::ExportError;

/// Errors returned while reading or writing the saved credentials file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// No home directory could be determined for the default location.
    #[error("unable to resolve the credentials file location: HOME is not set (use --credentials-path)")]
    MissingHome,

    /// Reading the credentials file failed.
    #[error("failed to read credentials file '{path}': {message}")]
    ReadFailed {
        /// Credentials file path.
        path: String,
        /// Error detail from the filesystem.
        message: String,
    },

    /// The credentials file is not valid JSON.
    #[error("credentials file '{path}' is not valid JSON: {message}")]
    InvalidFormat {
        /// Credentials file path.
        path: String,
        /// Decoding error detail.
        message: String,
    },

    /// Writing the credentials file failed.
    #[error("failed to write credentials file '{path}': {message}")]
    WriteFailed {
        /// Credentials file path.
        path: String,
        /// Error detail from the filesystem.
        message: String,
    },
}

impl From<PersistenceError> for ExportError {
    fn from(error: PersistenceError) -> Self {
        match error {
            PersistenceError::MissingHome => Self::Configuration {
                message: error.to_string(),
            },
            PersistenceError::ReadFailed { .. }
            | PersistenceError::InvalidFormat { .. }
            | PersistenceError::WriteFailed { .. } => Self::Io {
                message: error.to_string(),
            },
        }
    }
}
