//! The fixed print-to-logger substitution table.
//!
//! Rules are tried in table order. Marker rules come first and the plain
//! string-literal rule comes last: the plain pattern matches any quoted
//! message, so running it earlier would swallow every marker line into the
//! `debug`/`general` bucket.

use regex::{Captures, Regex};
use std::fmt;
use std::sync::OnceLock;

/// Method called on the shared logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

impl Level {
    pub fn method(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// `LogCategory` case passed as `category:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    General,
    Audio,
    Performance,
}

impl Category {
    pub fn tag(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Audio => "audio",
            Category::Performance => "performance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.tag())
    }
}

/// One compiled substitution.
#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pattern: Regex,
    payload_group: usize,
    pub level: Level,
    pub category: Category,
}

impl Rule {
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Render the structured call for a message payload.
    pub fn render(&self, payload: &str) -> String {
        format!(
            "logger.{}(\"{}\", category: {})",
            self.level.method(),
            payload,
            self.category
        )
    }

    /// Render a match of this rule's pattern, keeping only the payload group.
    pub fn render_captures(&self, caps: &Captures<'_>) -> String {
        let payload = caps.get(self.payload_group).map_or("", |m| m.as_str());
        self.render(payload)
    }
}

struct RuleSpec {
    name: &'static str,
    pattern: &'static str,
    payload_group: usize,
    level: Level,
    category: Category,
}

const RULE_TABLE: &[RuleSpec] = &[
    // print("🔄 [PREFIX] message"): the bracketed prefix is dropped
    RuleSpec {
        name: "bracket-prefix",
        pattern: r#"print\("🔄 \[([^\]]+)\] (.+)"\)"#,
        payload_group: 2,
        level: Level::Debug,
        category: Category::General,
    },
    RuleSpec {
        name: "success",
        pattern: r#"print\("✅ (.+)"\)"#,
        payload_group: 1,
        level: Level::Info,
        category: Category::General,
    },
    RuleSpec {
        name: "failure",
        pattern: r#"print\("❌ (.+)"\)"#,
        payload_group: 1,
        level: Level::Error,
        category: Category::General,
    },
    RuleSpec {
        name: "warning",
        pattern: r#"print\("⚠️ (.+)"\)"#,
        payload_group: 1,
        level: Level::Warning,
        category: Category::General,
    },
    RuleSpec {
        name: "audio",
        pattern: r#"print\("🎤 (.+)"\)"#,
        payload_group: 1,
        level: Level::Info,
        category: Category::Audio,
    },
    RuleSpec {
        name: "metrics",
        pattern: r#"print\("📊 (.+)"\)"#,
        payload_group: 1,
        level: Level::Debug,
        category: Category::Performance,
    },
    RuleSpec {
        name: "tooling",
        pattern: r#"print\("🔧 (.+)"\)"#,
        payload_group: 1,
        level: Level::Debug,
        category: Category::General,
    },
    // Must stay last
    RuleSpec {
        name: "plain",
        pattern: r#"print\("([^"]+)"\)"#,
        payload_group: 1,
        level: Level::Debug,
        category: Category::General,
    },
];

static RULES: OnceLock<Vec<Rule>> = OnceLock::new();

/// The ordered rule table, compiled on first use.
pub fn rules() -> &'static [Rule] {
    RULES.get_or_init(|| {
        RULE_TABLE
            .iter()
            .map(|spec| Rule {
                name: spec.name,
                pattern: Regex::new(spec.pattern).expect("built-in rule pattern must compile"),
                payload_group: spec.payload_group,
                level: spec.level,
                category: spec.category,
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["bracket-prefix", "success", "failure", "warning", "audio", "metrics", "tooling", "plain"]
        );
    }

    #[test]
    fn test_plain_rule_shadows_markers_if_run_first() {
        // Every marker line is also a plain match, which is why plain goes last
        let plain = rules().last().unwrap();
        for line in [r#"print("✅ done")"#, r#"print("🎤 mic on")"#, r#"print("🔄 [Sync] tick")"#] {
            assert!(plain.pattern().is_match(line), "{line}");
        }
    }

    #[test]
    fn test_render() {
        let audio = rules().iter().find(|r| r.name == "audio").unwrap();
        assert_eq!(audio.render("mic on"), r#"logger.info("mic on", category: .audio)"#);

        let metrics = rules().iter().find(|r| r.name == "metrics").unwrap();
        assert_eq!(metrics.level, Level::Debug);
        assert_eq!(metrics.category, Category::Performance);
    }

    #[test]
    fn test_bracket_prefix_payload_group() {
        let rule = &rules()[0];
        let caps = rule.pattern().captures(r#"print("🔄 [Recorder] starting")"#).unwrap();
        assert_eq!(rule.render_captures(&caps), r#"logger.debug("starting", category: .general)"#);
    }

    #[test]
    fn test_rendered_call_matches_no_rule() {
        for rule in rules() {
            let rendered = rule.render("payload");
            assert!(rules().iter().all(|r| !r.pattern().is_match(&rendered)), "{rendered}");
        }
    }
}
