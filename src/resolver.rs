//! Discovery of existing category folders.
//!
//! Before a canonical category folder is created, the destination root is
//! searched for a subdirectory that already serves the category under a
//! different name ("My Photos" for Images, "music" for Audio, ...). This
//! module only ever *finds* folders; creating one is the mover's job.

use crate::category::SynonymTable;
use std::fs;
use std::path::{Path, PathBuf};

/// Matches existing subdirectories against a category's alias list.
pub struct FolderResolver;

impl FolderResolver {
    /// Finds an existing subdirectory of `base` that matches `category_name`.
    ///
    /// Every immediate subdirectory of `base` is checked case-insensitively
    /// against the category's aliases; a directory matches when its
    /// lowercased name equals an alias or contains one anywhere inside it.
    /// The first match in directory enumeration order wins. That order is
    /// filesystem-dependent, so when several folders qualify, which one is
    /// returned is not defined.
    ///
    /// Returns `None` when `base` does not exist, is not a directory, or no
    /// subdirectory matches. Files are never matched, and no directory is
    /// ever created here.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use shelver::category::SynonymTable;
    /// use shelver::resolver::FolderResolver;
    /// use std::path::Path;
    ///
    /// let table = SynonymTable::default();
    /// // Reuses e.g. /dest/My Photos for the Images category.
    /// let found = FolderResolver::find_existing(Path::new("/dest"), "Images", &table);
    /// if let Some(dir) = found {
    ///     println!("reusing {}", dir.display());
    /// }
    /// ```
    pub fn find_existing(
        base: &Path,
        category_name: &str,
        synonyms: &SynonymTable,
    ) -> Option<PathBuf> {
        let entries = fs::read_dir(base).ok()?;
        let aliases = synonyms.aliases_for(category_name);

        for entry in entries.flatten() {
            if let Ok(file_type) = entry.file_type()
                && file_type.is_dir()
            {
                let name = entry.file_name().to_string_lossy().to_lowercase();
                if aliases.iter().any(|alias| name.contains(alias.as_str())) {
                    return Some(entry.path());
                }
            }
        }

        None
    }
}
