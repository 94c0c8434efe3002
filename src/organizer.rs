//! The organization pass: classify, resolve, move, report.
//!
//! One [`Organizer::organize`] call walks the immediate entries of a source
//! directory, sends every regular file to its category folder under the
//! destination root, and narrates the outcome through a caller-supplied
//! [`LogSink`]. The engine never prints and never panics; everything the
//! caller needs to know arrives as log lines plus the returned count.

use crate::category::{Category, CategoryMapper, SynonymTable};
use crate::config::CompiledIgnore;
use crate::mover::FileMover;
use crate::resolver::FolderResolver;
use std::fs;
use std::path::{Path, PathBuf};

/// Receives one human-readable line per event.
///
/// The engine has no opinion on where lines go; a console, a text widget,
/// and a file are all one impl away. Any `FnMut(String)` closure is already
/// a sink:
///
/// ```
/// use shelver::organizer::LogSink;
///
/// let mut lines = Vec::new();
/// let mut sink = |line: String| lines.push(line);
/// sink.emit("✓ Moved: a.jpg → Images".to_string());
/// assert_eq!(lines.len(), 1);
/// ```
pub trait LogSink {
    /// Delivers one log line.
    fn emit(&mut self, line: String);
}

impl<F: FnMut(String)> LogSink for F {
    fn emit(&mut self, line: String) {
        self(line)
    }
}

/// Moves the top-level files of a directory into category folders.
///
/// Holds the classification tables and optional ignore rules; one value can
/// serve any number of independent [`organize`](Organizer::organize) calls.
pub struct Organizer {
    mapper: CategoryMapper,
    synonyms: SynonymTable,
    ignore: CompiledIgnore,
}

impl Organizer {
    /// Creates an organizer with the standard tables and no ignore rules.
    pub fn new() -> Self {
        Self::with_ignore(CompiledIgnore::default())
    }

    /// Creates an organizer that skips files matching the given ignore rules.
    pub fn with_ignore(ignore: CompiledIgnore) -> Self {
        Self {
            mapper: CategoryMapper::new(),
            synonyms: SynonymTable::new(),
            ignore,
        }
    }

    /// Classifies a path by its extension.
    pub fn classify(&self, path: &Path) -> Category {
        self.mapper.category_for_path(path)
    }

    /// Returns true when the ignore rules exclude this path.
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.ignore.is_ignored(path)
    }

    /// Returns where files of `category` belong under `base`.
    ///
    /// Prefers an existing folder matching the category's aliases; falls
    /// back to the canonical `base/<folder_name>` path, which may not exist
    /// yet (the mover creates it on first use).
    pub fn destination_for(&self, base: &Path, category: Category) -> PathBuf {
        let folder = category.folder_name();
        FolderResolver::find_existing(base, folder, &self.synonyms)
            .unwrap_or_else(|| base.join(folder))
    }

    /// Performs one classification-and-move pass over `source`.
    ///
    /// Category folders are created under `dest` when given, otherwise under
    /// `source` itself. Only the immediate, regular files of `source` are
    /// considered: subdirectories, symlinks and other special entries are
    /// never touched, and the scan is strictly non-recursive.
    ///
    /// Every attempted file produces exactly one line through `sink`,
    /// success or failure, and bumps the returned count either way; a file
    /// that fails to move is left where it was and the scan continues. The
    /// count therefore tracks files *attempted*, with per-file success only
    /// visible in the log stream.
    ///
    /// A missing or unreadable source directory emits a single warning line
    /// and returns 0 without side effects. Nothing is shared between calls,
    /// so re-running on an already-organized directory is a no-op that
    /// returns 0.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use shelver::organizer::Organizer;
    /// use std::path::Path;
    ///
    /// let organizer = Organizer::new();
    /// let mut sink = |line: String| println!("{line}");
    /// let moved = organizer.organize(Path::new("/downloads"), None, &mut sink);
    /// println!("{moved} files processed");
    /// ```
    pub fn organize(&self, source: &Path, dest: Option<&Path>, sink: &mut dyn LogSink) -> usize {
        let base = dest.unwrap_or(source);

        let entries = match fs::read_dir(source) {
            Ok(entries) => entries,
            Err(_) => {
                sink.emit(format!(
                    "⚠ Source directory not found: {}",
                    source.display()
                ));
                return 0;
            }
        };

        let mut attempted = 0;
        for entry in entries.flatten() {
            if let Ok(file_type) = entry.file_type()
                && file_type.is_file()
            {
                let path = entry.path();
                if self.ignore.is_ignored(&path) {
                    continue;
                }

                let file_name = entry.file_name().to_string_lossy().to_string();
                let category = self.mapper.category_for_path(&path);
                let dest_dir = self.destination_for(base, category);

                match FileMover::move_into(&dest_dir, &path) {
                    Ok(_) => {
                        sink.emit(format!(
                            "✓ Moved: {} → {}",
                            file_name,
                            folder_label(&dest_dir)
                        ));
                    }
                    Err(e) => {
                        sink.emit(format!("⚠ Could not move {}: {}", file_name, e));
                    }
                }
                attempted += 1;
            }
        }

        attempted
    }
}

impl Default for Organizer {
    fn default() -> Self {
        Self::new()
    }
}

/// The terminal name of a destination folder, for log lines.
fn folder_label(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| dir.display().to_string())
}
