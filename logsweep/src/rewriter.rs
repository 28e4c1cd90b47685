use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing::debug;

use crate::rules::rules;

/// Substring that marks a rewritten call site.
pub const LOGGER_CALL: &str = "logger.";

/// Substring that marks an existing logger declaration.
pub const LOGGER_DECLARATION_MARKER: &str = "LoggingService";

/// Inserted after the leading import block when a rewrite introduces `logger.`
/// into a file that never declared it.
pub const LOGGER_DECLARATION: &str =
    "\n// LoggingService for unified logging\nprivate let logger = LoggingService.shared\n";

static IMPORT_BLOCK_END: OnceLock<Regex> = OnceLock::new();

/// An `import` line directly followed by a blank line.
fn import_block_end() -> &'static Regex {
    IMPORT_BLOCK_END.get_or_init(|| Regex::new(r"import [^\n]+\n\n").expect("import anchor pattern must compile"))
}

/// Result of rewriting one file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub text: String,
    /// Number of rule matches replaced.
    pub changes: usize,
    pub logger_injected: bool,
}

impl RewriteOutcome {
    pub fn is_changed(&self, original: &str) -> bool {
        self.text != original
    }
}

/// Apply every rule in table order, then add the logger declaration if the
/// rewritten text needs one.
///
/// Each rule runs over the output of the previous one, so text claimed by a
/// marker rule is already `logger.` code by the time the plain rule runs.
pub fn rewrite(original: &str) -> RewriteOutcome {
    let mut current = original.to_string();
    let mut changes = 0;

    for rule in rules() {
        let hits = rule.pattern().find_iter(&current).count();
        if hits == 0 {
            continue;
        }

        debug!(rule = rule.name, hits, "rule matched");
        current = rule
            .pattern()
            .replace_all(&current, |caps: &Captures<'_>| rule.render_captures(caps))
            .into_owned();
        changes += hits;
    }

    let mut logger_injected = false;
    if current != original && needs_logger_declaration(&current) {
        match inject_logger_declaration(&current) {
            Some(injected) => {
                current = injected;
                logger_injected = true;
            }
            None => debug!("no import block followed by a blank line; logger declaration skipped"),
        }
    }

    RewriteOutcome {
        text: current,
        changes,
        logger_injected,
    }
}

pub fn needs_logger_declaration(text: &str) -> bool {
    text.contains(LOGGER_CALL) && !text.contains(LOGGER_DECLARATION_MARKER)
}

/// Insert [`LOGGER_DECLARATION`] after the first import line that is
/// followed by a blank line. Returns `None` when no such line exists.
pub fn inject_logger_declaration(text: &str) -> Option<String> {
    let anchor = import_block_end().find(text)?;
    // Keep the blank line after the declaration
    let at = anchor.end() - 1;

    let mut result = String::with_capacity(text.len() + LOGGER_DECLARATION.len());
    result.push_str(&text[..at]);
    result.push_str(LOGGER_DECLARATION);
    result.push_str(&text[at..]);
    Some(result)
}
