//! Optional ignore rules, loaded from a TOML file.
//!
//! By default every regular file in the source directory is organized,
//! hidden files included. An ignore file opts specific junk out of the run:
//! skipped files are left in place, produce no log line, and do not count
//! as attempted. Classification itself is not configurable.
//!
//! # File format
//!
//! ```toml
//! [ignore]
//! filenames = [".DS_Store", "Thumbs.db"]
//! extensions = ["part", "crdownload"]
//! patterns = ["*.tmp"]
//! regex = ["^~\\$"]
//! ```

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading or compiling ignore rules.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// No file exists at the explicitly given path.
    NotFound(PathBuf),
    /// The file is not valid TOML for this schema.
    Parse(String),
    /// A glob pattern failed to compile.
    BadGlob(String),
    /// A regex failed to compile, with the compiler's reason.
    BadRegex { pattern: String, reason: String },
    /// The file could not be read.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Ignore file not found: {}", path.display())
            }
            ConfigError::Parse(msg) => write!(f, "Invalid ignore file: {}", msg),
            ConfigError::BadGlob(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::BadRegex { pattern, reason } => {
                write!(f, "Invalid regex '{}': {}", pattern, reason)
            }
            ConfigError::Io(msg) => write!(f, "Could not read ignore file: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level ignore configuration, as deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// The rules themselves; an absent table means nothing is ignored.
    #[serde(default)]
    pub ignore: IgnoreRules,
}

/// The individual rule lists. All default to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnoreRules {
    /// Exact file names to skip (e.g. ".DS_Store").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Extensions to skip, without the dot, case-insensitive.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Glob patterns matched against the file path.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Regex patterns matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

impl IgnoreConfig {
    /// Loads ignore rules, falling back to the empty default.
    ///
    /// Lookup order:
    /// 1. `config_path`, when given (missing or unreadable is an error)
    /// 2. `./.shelver.toml`
    /// 3. `~/.config/shelver/config.toml`
    /// 4. the empty default (nothing ignored)
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local = PathBuf::from(".shelver.toml");
        if local.exists() {
            return Self::load_from_file(&local);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("shelver")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Compiles the rule lists into matchers.
    ///
    /// Glob and regex patterns are parsed once here so the per-file check
    /// stays cheap; an unparseable pattern fails the whole load.
    pub fn compile(self) -> Result<CompiledIgnore, ConfigError> {
        CompiledIgnore::new(self.ignore)
    }
}

/// Pre-compiled ignore rules ready for per-file checks.
///
/// The default value ignores nothing.
#[derive(Debug, Clone, Default)]
pub struct CompiledIgnore {
    filenames: HashSet<String>,
    extensions: HashSet<String>,
    patterns: Vec<Pattern>,
    regexes: Vec<Regex>,
}

impl CompiledIgnore {
    fn new(rules: IgnoreRules) -> Result<Self, ConfigError> {
        let patterns = rules
            .patterns
            .iter()
            .map(|p| Pattern::new(p).map_err(|_| ConfigError::BadGlob(p.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        let regexes = rules
            .regex
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::BadRegex {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            filenames: rules.filenames.into_iter().collect(),
            extensions: rules
                .extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
            patterns,
            regexes,
        })
    }

    /// Returns true when any rule excludes this path.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.filenames.contains(file_name.as_ref()) {
            return true;
        }

        if let Some(ext) = path.extension() {
            let ext = ext.to_string_lossy().to_lowercase();
            if self.extensions.contains(&ext) {
                return true;
            }
        }

        if self.patterns.iter().any(|p| p.matches_path(path)) {
            return true;
        }

        self.regexes.iter().any(|r| r.is_match(&file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn compile(rules: IgnoreRules) -> CompiledIgnore {
        IgnoreConfig { ignore: rules }
            .compile()
            .expect("rules should compile")
    }

    #[test]
    fn test_default_ignores_nothing() {
        let ignore = CompiledIgnore::default();
        assert!(!ignore.is_ignored(Path::new("file.txt")));
        assert!(!ignore.is_ignored(Path::new(".DS_Store")));
        assert!(!ignore.is_ignored(Path::new(".hidden")));
    }

    #[test]
    fn test_exact_filenames() {
        let ignore = compile(IgnoreRules {
            filenames: vec![".DS_Store".to_string(), "Thumbs.db".to_string()],
            ..Default::default()
        });

        assert!(ignore.is_ignored(Path::new(".DS_Store")));
        assert!(ignore.is_ignored(Path::new("Thumbs.db")));
        assert!(!ignore.is_ignored(Path::new("photo.jpg")));
    }

    #[test]
    fn test_extensions_are_case_insensitive() {
        let ignore = compile(IgnoreRules {
            extensions: vec!["tmp".to_string()],
            ..Default::default()
        });

        assert!(ignore.is_ignored(Path::new("download.tmp")));
        assert!(ignore.is_ignored(Path::new("download.TMP")));
        assert!(!ignore.is_ignored(Path::new("download.txt")));
    }

    #[test]
    fn test_glob_patterns() {
        let ignore = compile(IgnoreRules {
            patterns: vec!["*.partial".to_string()],
            ..Default::default()
        });

        assert!(ignore.is_ignored(Path::new("movie.mkv.partial")));
        assert!(!ignore.is_ignored(Path::new("movie.mkv")));
    }

    #[test]
    fn test_regex_matches_file_name() {
        let ignore = compile(IgnoreRules {
            regex: vec![r"^~\$".to_string()],
            ..Default::default()
        });

        assert!(ignore.is_ignored(Path::new("~$budget.xlsx")));
        assert!(!ignore.is_ignored(Path::new("budget.xlsx")));
    }

    #[test]
    fn test_invalid_glob_fails_compilation() {
        let result = IgnoreConfig {
            ignore: IgnoreRules {
                patterns: vec!["[unclosed".to_string()],
                ..Default::default()
            },
        }
        .compile();
        assert!(matches!(result, Err(ConfigError::BadGlob(_))));
    }

    #[test]
    fn test_invalid_regex_fails_compilation() {
        let result = IgnoreConfig {
            ignore: IgnoreRules {
                regex: vec!["(unclosed".to_string()],
                ..Default::default()
            },
        }
        .compile();
        assert!(matches!(result, Err(ConfigError::BadRegex { .. })));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(
            file,
            "[ignore]\nfilenames = [\".DS_Store\"]\nextensions = [\"bak\"]"
        )
        .expect("Failed to write config");

        let config = IgnoreConfig::load(Some(file.path())).expect("load should succeed");
        assert_eq!(config.ignore.filenames, vec![".DS_Store".to_string()]);
        assert_eq!(config.ignore.extensions, vec!["bak".to_string()]);
    }

    #[test]
    fn test_empty_file_means_no_rules() {
        let file = NamedTempFile::new().expect("Failed to create temp file");
        let config = IgnoreConfig::load(Some(file.path())).expect("load should succeed");
        assert!(config.ignore.filenames.is_empty());
        assert!(config.ignore.patterns.is_empty());
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let result = IgnoreConfig::load(Some(Path::new("/no/such/ignore.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
