//! Moving files into their destination folders.
//!
//! The mover owns the only side effects of an organization run: it creates
//! destination folders on demand and relocates files into them. Failures are
//! returned as typed errors so the orchestrator can report them per file
//! without stopping the scan.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while moving a single file.
#[derive(Debug)]
pub enum MoveError {
    /// The destination folder could not be created.
    DirectoryCreationFailed {
        path: PathBuf,
        source: io::Error,
    },
    /// The file could not be moved to its destination.
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    /// The source path has no final name component.
    InvalidFileName { path: PathBuf },
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::MoveFailed { from, to, source } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
            Self::InvalidFileName { path } => {
                write!(f, "Path has no file name: {}", path.display())
            }
        }
    }
}

impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryCreationFailed { source, .. } => Some(source),
            Self::MoveFailed { source, .. } => Some(source),
            Self::InvalidFileName { .. } => None,
        }
    }
}

/// Result type for move operations.
pub type MoveResult<T> = Result<T, MoveError>;

/// Moves files into destination folders, creating them as needed.
pub struct FileMover;

impl FileMover {
    /// Moves `file_path` into `dest_dir`, keeping its file name.
    ///
    /// The destination folder is created recursively if it is missing;
    /// an already-existing folder is not an error. The move is a rename
    /// (atomic within one filesystem) with a copy-and-delete fallback when
    /// source and destination sit on different volumes. If a file of the
    /// same name already exists at the destination, the platform rename
    /// semantics decide the outcome.
    ///
    /// Returns the path the file now lives at. On any error the source file
    /// is left in place.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use shelver::mover::FileMover;
    /// use std::path::Path;
    ///
    /// let moved = FileMover::move_into(
    ///     Path::new("/downloads/Images"),
    ///     Path::new("/downloads/holiday.jpg"),
    /// );
    /// match moved {
    ///     Ok(new_path) => println!("now at {}", new_path.display()),
    ///     Err(e) => eprintln!("{e}"),
    /// }
    /// ```
    pub fn move_into(dest_dir: &Path, file_path: &Path) -> MoveResult<PathBuf> {
        fs::create_dir_all(dest_dir).map_err(|e| MoveError::DirectoryCreationFailed {
            path: dest_dir.to_path_buf(),
            source: e,
        })?;

        let file_name = file_path
            .file_name()
            .ok_or_else(|| MoveError::InvalidFileName {
                path: file_path.to_path_buf(),
            })?;
        let destination = dest_dir.join(file_name);

        match fs::rename(file_path, &destination) {
            Ok(()) => Ok(destination),
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                Self::copy_and_delete(file_path, &destination)
            }
            Err(e) => Err(MoveError::MoveFailed {
                from: file_path.to_path_buf(),
                to: destination,
                source: e,
            }),
        }
    }

    /// Cross-volume fallback: copy to the destination, then remove the
    /// source. A failed copy leaves the source untouched.
    fn copy_and_delete(file_path: &Path, destination: &Path) -> MoveResult<PathBuf> {
        fs::copy(file_path, destination).map_err(|e| MoveError::MoveFailed {
            from: file_path.to_path_buf(),
            to: destination.to_path_buf(),
            source: e,
        })?;

        if let Err(e) = fs::remove_file(file_path) {
            // The copy landed; report the leftover source rather than
            // deleting the copy again.
            return Err(MoveError::MoveFailed {
                from: file_path.to_path_buf(),
                to: destination.to_path_buf(),
                source: e,
            });
        }

        Ok(destination.to_path_buf())
    }
}
