#[cfg(test)]
mod rewriter_tests {
    use crate::rewriter::*;

    const SAMPLE_SERVICE: &str = r#"import Foundation
import AVFoundation

final class MicrophoneCaptureService {
    func start() {
        print("🔄 [Mic] preparing engine")
        print("🎤 input device ready")
        print("✅ capture started")
        print("📊 buffer size: \(size)")
        print("🔧 tap installed")
    }
}
"#;

    const SAMPLE_WITH_LOGGER: &str = r#"import Foundation

private let logger = LoggingService.shared

func stop() {
    print("❌ stop failed")
}
"#;

    #[test]
    fn test_marker_wins_over_plain() {
        let outcome = rewrite(r#"print("✅ done")"#);
        assert_eq!(outcome.text, r#"logger.info("done", category: .general)"#);
        assert_eq!(outcome.changes, 1);
    }

    #[test]
    fn test_warning_payload_verbatim() {
        let outcome = rewrite(r#"    print("⚠️ low battery")"#);
        assert_eq!(outcome.text, r#"    logger.warning("low battery", category: .general)"#);
    }

    #[test]
    fn test_each_marker() {
        let cases = [
            (r#"print("🔄 [Sync] tick")"#, r#"logger.debug("tick", category: .general)"#),
            (r#"print("❌ boom")"#, r#"logger.error("boom", category: .general)"#),
            (r#"print("🎤 mic on")"#, r#"logger.info("mic on", category: .audio)"#),
            (r#"print("📊 42 frames")"#, r#"logger.debug("42 frames", category: .performance)"#),
            (r#"print("🔧 patched")"#, r#"logger.debug("patched", category: .general)"#),
            (r#"print("plain message")"#, r#"logger.debug("plain message", category: .general)"#),
        ];

        for (input, expected) in cases {
            let outcome = rewrite(input);
            assert_eq!(outcome.text, expected, "input: {input}");
            assert_eq!(outcome.changes, 1, "input: {input}");
        }
    }

    #[test]
    fn test_interpolation_and_dollar_kept_verbatim() {
        let outcome = rewrite(r#"print("cost $1 for \(item)")"#);
        assert_eq!(outcome.text, r#"logger.debug("cost $1 for \(item)", category: .general)"#);
    }

    #[test]
    fn test_untouched_calls() {
        // Only calls whose sole argument is a string literal are rewritten
        let input = "print(value)\nprint(\"a\", \"b\")\nprint(String(format: \"%d\", n))\n";
        let outcome = rewrite(input);
        assert_eq!(outcome.changes, 0);
        assert_eq!(outcome.text, input);
        assert!(!outcome.is_changed(input));
        assert!(!outcome.logger_injected);
    }

    #[test]
    fn test_marker_rules_stay_on_one_line() {
        // `.+` stops at a newline, so the plain rule picks this one up
        let outcome = rewrite("print(\"✅ first\nsecond\")");
        assert_eq!(outcome.text, "logger.debug(\"✅ first\nsecond\", category: .general)");
        assert_eq!(outcome.changes, 1);
    }

    #[test]
    fn test_rewrite_service() {
        let outcome = rewrite(SAMPLE_SERVICE);

        assert_eq!(outcome.changes, 5);
        assert!(outcome.logger_injected);
        assert!(!outcome.text.contains("print("));
        assert!(outcome.text.contains(r#"logger.debug("buffer size: \(size)", category: .performance)"#));
        assert!(outcome.text.starts_with(
            "import Foundation\nimport AVFoundation\n\n// LoggingService for unified logging\nprivate let logger = LoggingService.shared\n\nfinal class"
        ));
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let first = rewrite(SAMPLE_SERVICE);
        let second = rewrite(&first.text);

        assert_eq!(second.changes, 0);
        assert_eq!(second.text, first.text);
        assert!(!second.logger_injected);
    }

    #[test]
    fn test_declaration_injected_once() {
        let mut input = String::from("import Foundation\n\nfunc run() {\n");
        for i in 0..5 {
            input.push_str(&format!("    print(\"step {i}\")\n"));
        }
        input.push_str("}\n");

        let outcome = rewrite(&input);

        assert_eq!(outcome.changes, 5);
        assert_eq!(outcome.text.matches(LOGGER_DECLARATION).count(), 1);
        assert_eq!(outcome.text.matches("LoggingService.shared").count(), 1);
    }

    #[test]
    fn test_existing_declaration_not_duplicated() {
        let outcome = rewrite(SAMPLE_WITH_LOGGER);

        assert_eq!(outcome.changes, 1);
        assert!(!outcome.logger_injected);
        assert_eq!(outcome.text.matches("LoggingService.shared").count(), 1);
        assert!(outcome.text.contains(r#"logger.error("stop failed", category: .general)"#));
    }

    #[test]
    fn test_injection_skipped_without_anchor() {
        // Import directly followed by code: no blank line to anchor on
        let input = "import Foundation\nfunc run() {\n    print(\"hi\")\n}\n";
        let outcome = rewrite(input);

        assert_eq!(outcome.changes, 1);
        assert!(!outcome.logger_injected);
        assert!(!outcome.text.contains(LOGGER_DECLARATION_MARKER));
    }

    #[test]
    fn test_injection_skipped_without_imports() {
        let outcome = rewrite("\nprint(\"hi\")\n");
        assert_eq!(outcome.text, "\nlogger.debug(\"hi\", category: .general)\n");
        assert!(!outcome.logger_injected);
    }

    #[test]
    fn test_inject_after_first_import_followed_by_blank() {
        let text = "import Foundation\n\nimport OSLog\n\nlet x = 1\n";
        let injected = inject_logger_declaration(text).unwrap();
        assert_eq!(
            injected,
            "import Foundation\n\n// LoggingService for unified logging\nprivate let logger = LoggingService.shared\n\nimport OSLog\n\nlet x = 1\n"
        );
    }

    #[test]
    fn test_needs_logger_declaration() {
        assert!(needs_logger_declaration("logger.info(\"x\", category: .general)"));
        assert!(!needs_logger_declaration("let logger = LoggingService.shared\nlogger.info(\"x\")"));
        assert!(!needs_logger_declaration("print(\"x\")"));
    }
}
