//! Output file that only appears at its final path after a successful
//! commit.
//!
//! Bytes are written to a hidden `.<name>.partial` sibling which is created
//! lazily on the first write. Committing renames it into place; dropping an
//! uncommitted file removes the partial sibling. An export that fails before
//! writing therefore touches nothing on disk.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, File};

use crate::report::ExportError;

/// Write sink for a file that is published atomically on [`commit`].
///
/// [`commit`]: StagedFile::commit
#[derive(Debug)]
pub struct StagedFile {
    path: Utf8PathBuf,
    parent: Utf8PathBuf,
    file_name: String,
    staging_name: String,
    staged: Option<(Dir, File)>,
    committed: bool,
}

impl StagedFile {
    /// Prepares a staged file for `path` without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Configuration`] when `path` has no file name.
    pub fn new(path: &Utf8Path) -> Result<Self, ExportError> {
        let file_name = path.file_name().ok_or_else(|| ExportError::Configuration {
            message: format!("invalid output path '{path}': no file name"),
        })?;
        let parent = match path.parent() {
            Some(dir) if !dir.as_str().is_empty() => dir.to_path_buf(),
            _ => Utf8PathBuf::from("."),
        };

        Ok(Self {
            path: path.to_path_buf(),
            parent,
            file_name: file_name.to_owned(),
            staging_name: format!(".{file_name}.partial"),
            staged: None,
            committed: false,
        })
    }

    /// Returns the final output path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        self.path.as_path()
    }

    /// Returns true once the partial file has been created on disk.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.staged.is_some()
    }

    /// Flushes the partial file and renames it to the final path.
    ///
    /// A file that was never written is created empty.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] when flushing, syncing, or renaming fails.
    pub fn commit(mut self) -> Result<Utf8PathBuf, ExportError> {
        let path = self.path.clone();
        let staging_name = self.staging_name.clone();
        let file_name = self.file_name.clone();
        let (dir, file) = self
            .staged_mut()
            .map_err(|e| ExportError::io(&format!("failed to create '{path}'"), &e))?;

        file.flush()
            .map_err(|e| ExportError::io(&format!("failed to flush '{path}'"), &e))?;
        file.sync_all()
            .map_err(|e| ExportError::io(&format!("failed to sync '{path}'"), &e))?;
        dir.rename(&staging_name, &*dir, &file_name)
            .map_err(|e| ExportError::io(&format!("failed to move output into '{path}'"), &e))?;

        self.committed = true;
        Ok(path)
    }

    fn staged_mut(&mut self) -> io::Result<&mut (Dir, File)> {
        if self.staged.is_none() {
            Dir::create_ambient_dir_all(&self.parent, ambient_authority())?;
            let dir = Dir::open_ambient_dir(&self.parent, ambient_authority())?;
            let file = dir.create(&self.staging_name)?;
            self.staged = Some((dir, file));
        }
        self.staged
            .as_mut()
            .ok_or_else(|| io::Error::other("staged file was not created"))
    }
}

impl Write for StagedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let (_, file) = self.staged_mut()?;
        file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.staged.as_mut() {
            Some((_, file)) => file.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        let Some((dir, file)) = self.staged.take() else {
            return;
        };
        drop(file);
        if let Err(error) = dir.remove_file(&self.staging_name) {
            tracing::debug!(
                path = %self.path,
                "failed to remove partial output file: {error}"
            );
        }
    }
}
