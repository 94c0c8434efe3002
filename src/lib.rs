//! shelver - sort loose files into category folders
//!
//! This library classifies the top-level files of a directory by extension,
//! finds or creates the matching category folder under a destination root
//! (reusing existing folders whose names match a category's synonyms), and
//! moves each file there, reporting every outcome through a log sink.

pub mod category;
pub mod cli;
pub mod config;
pub mod mover;
pub mod organizer;
pub mod output;
pub mod resolver;

pub use category::{Category, CategoryMapper, SynonymTable};
pub use config::{CompiledIgnore, ConfigError, IgnoreConfig, IgnoreRules};
pub use mover::{FileMover, MoveError, MoveResult};
pub use organizer::{LogSink, Organizer};
pub use resolver::FolderResolver;

pub use cli::{Cli, run};
