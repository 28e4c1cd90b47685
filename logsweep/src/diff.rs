use similar::{ChangeTag, TextDiff};
use std::path::Path;

use crate::rewriter::LOGGER_DECLARATION_MARKER;

/// What `--format diff` reports across the files a sweep rewrote.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiffStats {
    pub files_changed: usize,
    /// Removed lines that held a `print("...")` call.
    pub calls_rewritten: usize,
    /// Added lines that declare the shared logger.
    pub declarations_added: usize,
    pub lines_added: usize,
    pub lines_removed: usize,
}

impl DiffStats {
    pub fn add(&mut self, other: &DiffStats) {
        self.files_changed += other.files_changed;
        self.calls_rewritten += other.calls_rewritten;
        self.declarations_added += other.declarations_added;
        self.lines_added += other.lines_added;
        self.lines_removed += other.lines_removed;
    }

    pub fn print_summary(&self) {
        println!(
            "\n{} file(s): {} call site(s) rewritten, {} logger declaration(s) added (+{} -{} lines)",
            self.files_changed, self.calls_rewritten, self.declarations_added, self.lines_added, self.lines_removed
        );
    }
}

/// Git-style unified diff of a rewrite plus its stats.
pub fn render_diff(path: &Path, before: &str, after: &str, context_lines: usize) -> (String, DiffStats) {
    let diff = TextDiff::from_lines(before, after);
    let mut stats = DiffStats::default();

    for change in diff.iter_all_changes() {
        let line = change.value();
        match change.tag() {
            ChangeTag::Delete => {
                stats.lines_removed += 1;
                if line.contains("print(\"") {
                    stats.calls_rewritten += 1;
                }
            }
            ChangeTag::Insert => {
                stats.lines_added += 1;
                if line.contains(LOGGER_DECLARATION_MARKER) && line.contains("let logger") {
                    stats.declarations_added += 1;
                }
            }
            ChangeTag::Equal => {}
        }
    }
    if stats.lines_added + stats.lines_removed == 0 {
        return (String::new(), stats);
    }
    stats.files_changed = 1;

    let path_str = path.display();
    let output = diff
        .unified_diff()
        .context_radius(context_lines)
        .header(&format!("a/{path_str}"), &format!("b/{path_str}"))
        .to_string();

    (output, stats)
}

/// Print the diff for one file; prints nothing when the text is unchanged.
pub fn print_diff(path: &Path, before: &str, after: &str) -> DiffStats {
    let (output, stats) = render_diff(path, before, after, 3);
    print!("{output}");
    stats
}
