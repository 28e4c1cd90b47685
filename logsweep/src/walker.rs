use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::diff::{print_diff, DiffStats};
use crate::error::{Result, SweepError};
use crate::rewriter::{rewrite, RewriteOutcome};

/// File-name suffix of the files a sweep considers.
pub const SOURCE_SUFFIX: &str = ".swift";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per modified file plus the closing summary.
    #[default]
    Default,
    /// Also print a unified diff for each modified file.
    Diff,
}

#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    pub dry_run: bool,
    pub format: OutputFormat,
    pub exclude: Vec<String>,
}

/// A file the sweep could not process.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: SweepError,
}

#[derive(Debug, Default)]
pub struct SweepSummary {
    pub files_scanned: usize,
    pub files_modified: usize,
    pub total_changes: usize,
    pub failures: Vec<FileFailure>,
    pub diff_stats: DiffStats,
}

/// Collect every `*.swift` file under `root`, sorted by path.
///
/// Symlinks to files count, as does a file named just `.swift`.
///
/// Exclude patterns containing glob metacharacters are matched with
/// `glob::Pattern`; anything else is a plain substring match on the path.
pub fn collect_source_files(root: &Path, exclude_patterns: &[String]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|e| e.file_name().to_string_lossy().ends_with(SOURCE_SUFFIX))
        .filter(|e| e.path().is_file())
        .map(|e| e.into_path())
        .collect();

    if !exclude_patterns.is_empty() {
        files.retain(|file| !is_excluded(file, exclude_patterns));
    }

    files.sort();
    files
}

fn is_excluded(file: &Path, exclude_patterns: &[String]) -> bool {
    let file_str = file.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(&file_str))
                .unwrap_or(false)
        } else {
            file_str.contains(pattern.as_str())
        }
    })
}

/// Read and decode one file.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| SweepError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| SweepError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Rewrite one file, writing it back only when the text changed.
///
/// Returns the original text alongside the outcome so callers can diff.
pub fn process_file(path: &Path, dry_run: bool) -> Result<(String, RewriteOutcome)> {
    let original = read_source(path)?;
    let outcome = rewrite(&original);

    if outcome.is_changed(&original) && !dry_run {
        fs::write(path, &outcome.text).map_err(|source| SweepError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), changes = outcome.changes, "file rewritten");
    }

    Ok((original, outcome))
}

/// Sweep every source file under `root`.
///
/// Only a missing root is fatal. Per-file errors are reported on stderr,
/// recorded in the summary, and the sweep continues.
pub fn sweep(root: &Path, options: &SweepOptions) -> Result<SweepSummary> {
    if !root.exists() {
        return Err(SweepError::InvalidRoot(root.to_path_buf()));
    }

    let files = collect_source_files(root, &options.exclude);
    info!(root = %root.display(), count = files.len(), "collected source files");
    println!("Processing {} Swift files...", files.len());

    let mut summary = SweepSummary {
        files_scanned: files.len(),
        ..SweepSummary::default()
    };

    for path in files {
        let (original, outcome) = match process_file(&path, options.dry_run) {
            Ok(result) => result,
            Err(error) => {
                eprintln!("{}", failure_line(&path, &error));
                summary.failures.push(FileFailure { path, error });
                continue;
            }
        };

        if outcome.changes == 0 {
            continue;
        }

        summary.files_modified += 1;
        summary.total_changes += outcome.changes;

        if options.format == OutputFormat::Diff {
            summary.diff_stats.add(&print_diff(&path, &original, &outcome.text));
        }

        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if options.dry_run {
            println!("🔍 {}: {} print statements would be converted", name, outcome.changes);
        } else {
            println!("✅ {}: {} print statements converted", name, outcome.changes);
        }
    }

    print_summary(&summary, options);
    Ok(summary)
}

fn failure_line(path: &Path, error: &SweepError) -> String {
    format!("Error processing {}: {}", path.display(), error)
}

fn print_summary(summary: &SweepSummary, options: &SweepOptions) {
    if options.format == OutputFormat::Diff {
        summary.diff_stats.print_summary();
    }

    println!("\n🎉 Complete!");
    println!("   Files modified: {}", summary.files_modified);
    println!("   Total print statements converted: {}", summary.total_changes);
    if !summary.failures.is_empty() {
        println!("   Files with errors: {}", summary.failures.len());
    }
    if options.dry_run {
        println!("Dry run: no files were written.");
    }
}
