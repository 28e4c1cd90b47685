pub mod rules;
pub mod rewriter;
pub mod walker;
pub mod diff;
pub mod error;

#[cfg(test)]
mod tests;

pub use diff::{print_diff, render_diff, DiffStats};
pub use error::{Result, SweepError};
pub use rewriter::{rewrite, RewriteOutcome};
pub use rules::{rules, Category, Level, Rule};
pub use walker::{collect_source_files, process_file, sweep, OutputFormat, SweepOptions, SweepSummary};
