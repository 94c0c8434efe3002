//! File classification tables.
//!
//! Maps file extensions to broad categories (Images, Videos, Audio, ...) and
//! carries the synonym lists used to recognize pre-existing category folders
//! under alternative names.
//!
//! # Examples
//!
//! ```
//! use shelver::category::{Category, CategoryMapper};
//!
//! let mapper = CategoryMapper::default();
//! assert_eq!(mapper.category_for(".png"), Category::Image);
//! assert_eq!(mapper.category_for("mp3"), Category::Audio);
//! assert_eq!(mapper.category_for(".xyz"), Category::Other);
//! ```

use std::collections::HashMap;
use std::path::Path;

/// A broad grouping of file types, used as the name of a destination folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Image files (PNG, JPG, GIF, etc.)
    Image,
    /// Video files (MP4, MKV, AVI, etc.)
    Video,
    /// Audio files (MP3, WAV, FLAC, etc.)
    Audio,
    /// Document files (PDF, DOCX, TXT, etc.)
    Document,
    /// Archive files (ZIP, RAR, TAR, etc.)
    Archive,
    /// Everything without a known extension.
    Other,
}

impl Category {
    /// Returns the canonical folder name for this category.
    ///
    /// This is the name used when a fresh category folder has to be created;
    /// matching *existing* folders goes through [`SynonymTable`] instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelver::category::Category;
    ///
    /// assert_eq!(Category::Image.folder_name(), "Images");
    /// assert_eq!(Category::Other.folder_name(), "Others");
    /// ```
    pub fn folder_name(&self) -> &'static str {
        match self {
            Category::Image => "Images",
            Category::Video => "Videos",
            Category::Audio => "Audio",
            Category::Document => "Documents",
            Category::Archive => "Archives",
            Category::Other => "Others",
        }
    }
}

/// Maps file extensions to categories.
///
/// Lookups are case-insensitive and total: extensions not present in the
/// table map to [`Category::Other`]. The table is populated once at
/// construction and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CategoryMapper {
    extensions: HashMap<String, Category>,
}

impl CategoryMapper {
    /// Creates a mapper with all standard extension mappings.
    pub fn new() -> Self {
        let mut mapper = Self {
            extensions: HashMap::new(),
        };
        mapper.populate_standard_mappings();
        mapper
    }

    fn populate_standard_mappings(&mut self) {
        // Images
        self.add_extension_mapping("jpg", Category::Image);
        self.add_extension_mapping("jpeg", Category::Image);
        self.add_extension_mapping("png", Category::Image);
        self.add_extension_mapping("gif", Category::Image);
        self.add_extension_mapping("bmp", Category::Image);
        self.add_extension_mapping("tiff", Category::Image);
        self.add_extension_mapping("webp", Category::Image);

        // Videos
        self.add_extension_mapping("mp4", Category::Video);
        self.add_extension_mapping("mov", Category::Video);
        self.add_extension_mapping("avi", Category::Video);
        self.add_extension_mapping("mkv", Category::Video);
        self.add_extension_mapping("flv", Category::Video);
        self.add_extension_mapping("wmv", Category::Video);

        // Audio
        self.add_extension_mapping("mp3", Category::Audio);
        self.add_extension_mapping("wav", Category::Audio);
        self.add_extension_mapping("flac", Category::Audio);
        self.add_extension_mapping("aac", Category::Audio);
        self.add_extension_mapping("ogg", Category::Audio);
        self.add_extension_mapping("m4a", Category::Audio);

        // Documents
        self.add_extension_mapping("pdf", Category::Document);
        self.add_extension_mapping("txt", Category::Document);
        self.add_extension_mapping("doc", Category::Document);
        self.add_extension_mapping("docx", Category::Document);
        self.add_extension_mapping("xls", Category::Document);
        self.add_extension_mapping("xlsx", Category::Document);
        self.add_extension_mapping("ppt", Category::Document);
        self.add_extension_mapping("pptx", Category::Document);

        // Archives
        self.add_extension_mapping("zip", Category::Archive);
        self.add_extension_mapping("rar", Category::Archive);
        self.add_extension_mapping("tar", Category::Archive);
        self.add_extension_mapping("gz", Category::Archive);
    }

    /// Adds an extension to category mapping. The extension may be given
    /// with or without the leading dot.
    pub fn add_extension_mapping(&mut self, ext: &str, category: Category) {
        self.extensions.insert(Self::normalize(ext), category);
    }

    /// Returns the category for a file extension.
    ///
    /// Accepts the extension with or without the leading dot, in any case.
    /// Unknown extensions map to [`Category::Other`].
    ///
    /// # Examples
    ///
    /// ```
    /// use shelver::category::{Category, CategoryMapper};
    ///
    /// let mapper = CategoryMapper::default();
    /// assert_eq!(mapper.category_for("PDF"), Category::Document);
    /// assert_eq!(mapper.category_for(".tar"), Category::Archive);
    /// assert_eq!(mapper.category_for(""), Category::Other);
    /// ```
    pub fn category_for(&self, extension: &str) -> Category {
        self.extensions
            .get(&Self::normalize(extension))
            .copied()
            .unwrap_or(Category::Other)
    }

    /// Returns the category for a path, derived from its extension.
    ///
    /// Paths without an extension map to [`Category::Other`].
    pub fn category_for_path(&self, path: &Path) -> Category {
        match path.extension() {
            Some(ext) => self.category_for(&ext.to_string_lossy()),
            None => Category::Other,
        }
    }

    /// Table keys are lowercased and dot-prefixed.
    fn normalize(ext: &str) -> String {
        let lower = ext.to_lowercase();
        if lower.starts_with('.') {
            lower
        } else {
            format!(".{lower}")
        }
    }
}

impl Default for CategoryMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Alias lists used to recognize existing category folders.
///
/// A folder named "My Photos 2024" should be reused as the Images bucket
/// even though it is not called "Images"; the alias list for a category
/// holds the lowercased names and name fragments that count as a match.
/// These lists are only consulted when *matching* existing folders, never
/// when naming new ones.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    aliases: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    /// Creates a table with the standard alias lists.
    pub fn new() -> Self {
        let mut table = Self {
            aliases: HashMap::new(),
        };
        table.add_aliases("images", &["images", "pictures", "photos", "pics"]);
        table.add_aliases("videos", &["videos", "video", "movies", "clips"]);
        table.add_aliases("audio", &["audio", "music", "songs", "sound"]);
        table.add_aliases("documents", &["documents", "docs", "files", "text"]);
        table.add_aliases("archives", &["archives", "zips", "compressed"]);
        table.add_aliases("others", &["others", "misc", "unsorted", "various"]);
        table
    }

    /// Registers the alias list for a category key.
    pub fn add_aliases(&mut self, category: &str, aliases: &[&str]) {
        self.aliases.insert(
            category.to_lowercase(),
            aliases.iter().map(|a| a.to_lowercase()).collect(),
        );
    }

    /// Returns the aliases accepted for a category name.
    ///
    /// The name is matched case-insensitively. Categories without an
    /// explicit entry fall back to a single alias: the lowercased name
    /// itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelver::category::SynonymTable;
    ///
    /// let table = SynonymTable::default();
    /// assert!(table.aliases_for("Images").contains(&"photos".to_string()));
    /// assert_eq!(table.aliases_for("Widgets"), vec!["widgets".to_string()]);
    /// ```
    pub fn aliases_for(&self, category_name: &str) -> Vec<String> {
        let key = category_name.to_lowercase();
        match self.aliases.get(&key) {
            Some(aliases) => aliases.clone(),
            None => vec![key],
        }
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_folder_names() {
        assert_eq!(Category::Image.folder_name(), "Images");
        assert_eq!(Category::Video.folder_name(), "Videos");
        assert_eq!(Category::Audio.folder_name(), "Audio");
        assert_eq!(Category::Document.folder_name(), "Documents");
        assert_eq!(Category::Archive.folder_name(), "Archives");
        assert_eq!(Category::Other.folder_name(), "Others");
    }

    #[test]
    fn test_known_extensions() {
        let mapper = CategoryMapper::default();
        assert_eq!(mapper.category_for(".png"), Category::Image);
        assert_eq!(mapper.category_for(".mp4"), Category::Video);
        assert_eq!(mapper.category_for(".mp3"), Category::Audio);
        assert_eq!(mapper.category_for(".pdf"), Category::Document);
        assert_eq!(mapper.category_for(".zip"), Category::Archive);
    }

    #[test]
    fn test_unknown_extension_is_other() {
        let mapper = CategoryMapper::default();
        assert_eq!(mapper.category_for(".xyz"), Category::Other);
        assert_eq!(mapper.category_for(""), Category::Other);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mapper = CategoryMapper::default();
        assert_eq!(mapper.category_for(".PNG"), Category::Image);
        assert_eq!(mapper.category_for("Jpg"), Category::Image);
    }

    #[test]
    fn test_leading_dot_is_optional() {
        let mapper = CategoryMapper::default();
        assert_eq!(mapper.category_for("png"), Category::Image);
        assert_eq!(mapper.category_for(".png"), Category::Image);
    }

    #[test]
    fn test_category_for_path() {
        let mapper = CategoryMapper::default();
        assert_eq!(
            mapper.category_for_path(Path::new("/tmp/holiday.JPG")),
            Category::Image
        );
        assert_eq!(
            mapper.category_for_path(Path::new("/tmp/README")),
            Category::Other
        );
    }

    #[test]
    fn test_custom_extension_mapping() {
        let mut mapper = CategoryMapper::default();
        mapper.add_extension_mapping("opus", Category::Audio);
        assert_eq!(mapper.category_for(".opus"), Category::Audio);
    }

    #[test]
    fn test_aliases_for_known_category() {
        let table = SynonymTable::default();
        let aliases = table.aliases_for("images");
        assert!(aliases.contains(&"pictures".to_string()));
        assert!(aliases.contains(&"photos".to_string()));
    }

    #[test]
    fn test_aliases_lookup_is_case_insensitive() {
        let table = SynonymTable::default();
        assert_eq!(table.aliases_for("AUDIO"), table.aliases_for("audio"));
    }

    #[test]
    fn test_unknown_category_falls_back_to_its_own_name() {
        let table = SynonymTable::default();
        assert_eq!(table.aliases_for("Projects"), vec!["projects".to_string()]);
    }

    #[test]
    fn test_audio_aliases_exclude_tunes() {
        let table = SynonymTable::default();
        assert!(!table.aliases_for("audio").contains(&"tunes".to_string()));
    }
}
