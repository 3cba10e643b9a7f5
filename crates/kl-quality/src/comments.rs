//! Single-line comment rule.
//!
//! Any `/*` followed, anywhere later in the file, by `*/` is a violation.
//! The scan is textual: markers inside string literals count too.

use std::fmt;

use kl_core::Violation;
use regex::Regex;

const BLOCK_COMMENT_PATTERN: &str = r"(?s)/\*.*\*/";

/// Comment rule checker.
pub struct CommentChecker {
    pattern: Regex,
}

impl CommentChecker {
    /// Create a new checker.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(BLOCK_COMMENT_PATTERN).expect("block comment pattern is valid"),
        }
    }

    /// Check one file's contents.
    ///
    /// Reports the line of the first opening marker.
    pub fn check(&self, path: impl fmt::Display, code: &str) -> Option<Violation> {
        let found = self.pattern.find(code)?;
        let line = code[..found.start()].matches('\n').count() + 1;
        Some(Violation::multiline_comment(path).at_line(line))
    }
}

impl Default for CommentChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kl_core::Rule;

    #[test]
    fn test_block_comment_is_flagged() {
        let checker = CommentChecker::new();
        let v = checker.check("kudos/lib/libc.c", "int x; /* counter */\n").unwrap();
        assert_eq!(v.rule, Rule::MultilineComment);
        assert_eq!(v.line, Some(1));
        assert_eq!(
            v.message,
            "kudos/lib/libc.c is using multiline comments. Only //-style comments are allowed."
        );
    }

    #[test]
    fn test_comment_spanning_lines() {
        let checker = CommentChecker::new();
        let code = "#include \"lib.h\"\n\n/*\n * Boot code.\n */\nvoid boot(void);\n";
        let v = checker.check("kudos/init/main.c", code).unwrap();
        assert_eq!(v.line, Some(3));
    }

    #[test]
    fn test_line_comments_pass() {
        let checker = CommentChecker::new();
        let code = "// Boot code.\n// See main.c\nvoid boot(void); // entry\n";
        assert!(checker.check("kudos/init/main.c", code).is_none());
    }

    #[test]
    fn test_unclosed_marker_passes() {
        let checker = CommentChecker::new();
        assert!(checker.check("a.c", "int *p = a /* b;\n").is_none());
        assert!(checker.check("a.c", "*/ int x; /*\n").is_none());
    }
}
