//! Saved credentials file.
//!
//! Credentials are kept as a small JSON object in the operator's home
//! directory so that subsequent runs need not repeat them:
//!
//! ```json
//! {"cloud_name": "demo", "api_key": "1234", "api_secret": "abcd"}
//! ```

use std::io::{self, Write};
#[cfg(unix)]
use cap_std::fs::OpenOptionsExt;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::OpenOptions;
#[cfg(unix)]
use cap_std::fs::PermissionsExt;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;

use crate::report::ApiCredentials;

use super::error::PersistenceError;

/// File name of the saved credentials in the home directory.
pub const CREDENTIALS_FILE_NAME: &str = ".cld_lar_config.json";

#[derive(Debug, Default, Deserialize)]
struct StoredCredentials {
    cloud_name: Option<String>,
    api_key: Option<String>,
    api_secret: Option<String>,
}

/// Reads and writes the saved credentials file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialsStore {
    path: Utf8PathBuf,
}

impl CredentialsStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at `${HOME}/.cld_lar_config.json`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::MissingHome`] when `HOME` is unset or
    /// empty.
    pub fn at_default_location() -> Result<Self, PersistenceError> {
        let home = std::env::var("HOME").ok().filter(|v| !v.is_empty());
        resolve_default_path(home.as_deref()).map(Self::new)
    }

    /// Returns the credentials file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        self.path.as_path()
    }

    /// Loads saved credentials.
    ///
    /// Returns `None` when the file does not exist or does not contain all
    /// three credential fields.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::ReadFailed`] when the file exists but
    /// cannot be read, or [`PersistenceError::InvalidFormat`] when it is not
    /// a JSON object.
    pub fn load(&self) -> Result<Option<ApiCredentials>, PersistenceError> {
        let contents = match self.read_contents() {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(PersistenceError::ReadFailed {
                    path: self.path.to_string(),
                    message: error.to_string(),
                });
            }
        };

        let stored: StoredCredentials =
            serde_json::from_str(&contents).map_err(|error| PersistenceError::InvalidFormat {
                path: self.path.to_string(),
                message: error.to_string(),
            })?;

        let StoredCredentials {
            cloud_name: Some(cloud_name),
            api_key: Some(api_key),
            api_secret: Some(api_secret),
        } = stored
        else {
            tracing::debug!(path = %self.path, "saved credentials are incomplete; ignoring");
            return Ok(None);
        };

        Ok(ApiCredentials::new(cloud_name, api_key, api_secret).ok())
    }

    /// Saves credentials, replacing any existing file.
    ///
    /// Parent directories are created when needed. On Unix the file is
    /// readable by its owner only.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::WriteFailed`] when the file cannot be
    /// written.
    pub fn save(&self, credentials: &ApiCredentials) -> Result<(), PersistenceError> {
        self.write_contents(credentials)
            .map_err(|error| PersistenceError::WriteFailed {
                path: self.path.to_string(),
                message: error.to_string(),
            })
    }

    fn read_contents(&self) -> io::Result<String> {
        let (parent, file_name) = self.split_path()?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
        dir.read_to_string(file_name)
    }

    fn write_contents(&self, credentials: &ApiCredentials) -> io::Result<()> {
        let (parent, file_name) = self.split_path()?;
        let serialised = serde_json::to_string(credentials).map_err(io::Error::other)?;

        Dir::create_ambient_dir_all(parent, ambient_authority())?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = dir.open_with(file_name, &options)?;

        // The creation mode only applies to new files.
        #[cfg(unix)]
        {
            let mut permissions = file.metadata()?.permissions();
            permissions.set_mode(0o600);
            file.set_permissions(permissions)?;
        }

        file.write_all(serialised.as_bytes())?;
        file.sync_all()
    }

    fn split_path(&self) -> io::Result<(&Utf8Path, &str)> {
        let file_name = self.path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{}' has no file name", self.path),
            )
        })?;
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_str().is_empty() => dir,
            _ => Utf8Path::new("."),
        };
        Ok((parent, file_name))
    }
}

/// Resolves the default credentials path from an optional home directory.
///
/// Kept separate from [`CredentialsStore::at_default_location`] so the
/// environment-sensitive logic is testable without mutating the process
/// environment.
pub(crate) fn resolve_default_path(home: Option<&str>) -> Result<Utf8PathBuf, PersistenceError> {
    home.map(|home_dir| Utf8PathBuf::from(home_dir).join(CREDENTIALS_FILE_NAME))
        .ok_or(PersistenceError::MissingHome)
}
