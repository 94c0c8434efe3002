//! Command-line shell around the organize engine.
//!
//! The shell owns everything the engine deliberately does not: argument
//! parsing, the progress bar, colored output, the optional audit log file,
//! and opening the destination folder afterwards. It talks to the engine
//! through a source path, an optional destination root, and a log sink.

use crate::config::IgnoreConfig;
use crate::organizer::Organizer;
use crate::output::OutputFormatter;
use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Sort the loose files of a directory into category subfolders.
#[derive(Debug, Parser)]
#[command(name = "shelver", version)]
pub struct Cli {
    /// Directory whose top-level files should be sorted
    pub source: PathBuf,

    /// Root for the category folders (defaults to the source directory)
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// Show what would happen without moving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Path to an ignore-rules TOML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Append every log line, timestamped, to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Open the destination in the system file manager when done
    #[arg(long)]
    pub open: bool,

    /// Suppress the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

/// Runs one shell invocation.
///
/// Loads ignore rules, then either previews (`--dry-run`) or performs the
/// organization pass, presenting the engine's log stream as it arrives.
pub fn run(cli: Cli) -> Result<(), String> {
    let config = IgnoreConfig::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading ignore rules: {}", e))?;
    let ignore = config
        .compile()
        .map_err(|e| format!("Error compiling ignore rules: {}", e))?;
    let organizer = Organizer::with_ignore(ignore);

    let base = cli.dest.clone().unwrap_or_else(|| cli.source.clone());

    if cli.dry_run {
        return dry_run(&organizer, &cli.source, &base);
    }

    OutputFormatter::info(&format!(
        "Organizing {} → {}",
        cli.source.display(),
        base.display()
    ));

    // Pre-count so the progress bar has a length; None means the source is
    // unreadable and the engine will say so itself.
    let candidates = count_candidates(&organizer, &cli.source);
    if candidates == Some(0) {
        OutputFormatter::warning("No files to organize.");
        return Ok(());
    }

    let mut log_file = match &cli.log_file {
        Some(path) => Some(LogFile::open(path).map_err(|e| {
            format!("Could not open log file {}: {}", path.display(), e)
        })?),
        None => None,
    };

    let progress = if cli.quiet {
        None
    } else {
        candidates.map(|n| OutputFormatter::create_progress_bar(n as u64))
    };

    let mut sink = |line: String| {
        if let Some(log) = log_file.as_mut() {
            log.append(&line);
        }
        match &progress {
            Some(pb) => {
                pb.println(OutputFormatter::log_line(&line));
                pb.inc(1);
            }
            None => OutputFormatter::plain(&OutputFormatter::log_line(&line)),
        }
    };

    let processed = organizer.organize(&cli.source, cli.dest.as_deref(), &mut sink);

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    OutputFormatter::success(&format!("Done! {} files processed.", processed));

    if cli.open && base.is_dir() {
        if let Err(e) = open_in_file_manager(&base) {
            OutputFormatter::warning(&format!("Could not open {}: {}", base.display(), e));
        }
    }

    Ok(())
}

/// Lists every candidate file with its detected content type and would-be
/// destination, then a per-category summary. Moves nothing.
fn dry_run(organizer: &Organizer, source: &Path, base: &Path) -> Result<(), String> {
    OutputFormatter::dry_run_notice(&format!("Analyzing contents of: {}", source.display()));

    let entries = fs::read_dir(source)
        .map_err(|e| format!("Error reading directory {}: {}", source.display(), e))?;

    let mut category_counts: HashMap<String, usize> = HashMap::new();
    let mut total = 0;

    for entry in entries.flatten() {
        if let Ok(file_type) = entry.file_type()
            && file_type.is_file()
        {
            let path = entry.path();
            if organizer.is_ignored(&path) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            let category = organizer.classify(&path);
            let dest_dir = organizer.destination_for(base, category);
            let folder = dest_dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| dest_dir.display().to_string());

            match detected_mime(&path) {
                Some(mime) => OutputFormatter::plain(&format!(" - {} ({})", name, mime)),
                None => OutputFormatter::plain(&format!(" - {}", name)),
            }
            OutputFormatter::plain(&format!("   → would move to {}/", folder));

            *category_counts.entry(folder).or_insert(0) += 1;
            total += 1;
        }
    }

    if total == 0 {
        OutputFormatter::plain("No files to organize.");
        return Ok(());
    }

    OutputFormatter::summary_table(&category_counts, total);
    OutputFormatter::dry_run_notice("No files were moved.");
    Ok(())
}

/// Counts the regular, non-ignored files the engine would attempt.
/// `None` when the source directory cannot be read.
fn count_candidates(organizer: &Organizer, source: &Path) -> Option<usize> {
    let entries = fs::read_dir(source).ok()?;
    let mut count = 0;
    for entry in entries.flatten() {
        if let Ok(file_type) = entry.file_type()
            && file_type.is_file()
            && !organizer.is_ignored(&entry.path())
        {
            count += 1;
        }
    }
    Some(count)
}

/// Content-sniffed MIME type, for the dry-run listing only; classification
/// goes by extension.
fn detected_mime(path: &Path) -> Option<String> {
    infer::get_from_path(path)
        .ok()
        .flatten()
        .map(|kind| kind.mime_type().to_string())
}

/// Appends timestamped log lines to a file.
struct LogFile {
    file: fs::File,
}

impl LogFile {
    fn open(path: &Path) -> io::Result<Self> {
        let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// A failed audit write never interrupts the scan.
    fn append(&mut self, line: &str) {
        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(self.file, "[{}] {}", stamp, line);
    }
}

/// Opens a folder in the platform file manager.
fn open_in_file_manager(path: &Path) -> io::Result<()> {
    #[cfg(target_os = "windows")]
    let program = "explorer";
    #[cfg(target_os = "macos")]
    let program = "open";
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let program = "xdg-open";

    Command::new(program).arg(path).spawn().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_source_only() {
        let cli = Cli::parse_from(["shelver", "/tmp/downloads"]);
        assert_eq!(cli.source, PathBuf::from("/tmp/downloads"));
        assert_eq!(cli.dest, None);
        assert!(!cli.dry_run);
        assert!(!cli.open);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::parse_from([
            "shelver",
            "in",
            "--dest",
            "out",
            "--dry-run",
            "--quiet",
            "--open",
            "--config",
            "rules.toml",
            "--log-file",
            "audit.log",
        ]);
        assert_eq!(cli.dest, Some(PathBuf::from("out")));
        assert!(cli.dry_run);
        assert!(cli.quiet);
        assert!(cli.open);
        assert_eq!(cli.config, Some(PathBuf::from("rules.toml")));
        assert_eq!(cli.log_file, Some(PathBuf::from("audit.log")));
    }

    #[test]
    fn test_count_candidates_skips_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path();
        fs::write(source.join("a.jpg"), "jpg").expect("Failed to write file");
        fs::write(source.join("b.mp3"), "mp3").expect("Failed to write file");
        fs::create_dir(source.join("already_sorted")).expect("Failed to create dir");

        let organizer = Organizer::new();
        assert_eq!(count_candidates(&organizer, source), Some(2));
    }

    #[test]
    fn test_count_candidates_missing_source() {
        let organizer = Organizer::new();
        assert_eq!(count_candidates(&organizer, Path::new("/no/such/dir")), None);
    }

    #[test]
    fn test_log_file_appends_timestamped_lines() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join("audit.log");

        let mut log = LogFile::open(&log_path).expect("Failed to open log file");
        log.append("✓ Moved: a.jpg → Images");
        log.append("✓ Moved: b.mp3 → Audio");

        let contents = fs::read_to_string(&log_path).expect("Failed to read log file");
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("✓ Moved: a.jpg → Images"));
    }
}
