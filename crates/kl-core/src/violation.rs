//! Rule violations and per-file outcomes.

use std::fmt;

use serde::Serialize;

use crate::source::{RequiredPrefix, SourcePath};

/// Rule that was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// No `#ifndef`/`#define`/`#endif` structure found
    MissingGuard,
    /// `#ifndef` and `#define` name different identifiers
    MismatchedOpenDefine,
    /// Guard does not start with the root's prefix
    WrongPrefix,
    /// Guard is not the name derived from the file's path
    WrongName,
    /// Another file already claims the guard name
    Conflict,
    /// Last line is not `#endif // NAME`
    WrongTerminator,
    /// A `/* ... */` comment is present
    MultilineComment,
}

impl Rule {
    /// All rules, in checking order.
    pub const ALL: [Rule; 7] = [
        Rule::MissingGuard,
        Rule::MismatchedOpenDefine,
        Rule::WrongPrefix,
        Rule::WrongName,
        Rule::Conflict,
        Rule::WrongTerminator,
        Rule::MultilineComment,
    ];

    /// Get the name of this rule.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::MissingGuard => "MissingGuard",
            Rule::MismatchedOpenDefine => "MismatchedOpenDefine",
            Rule::WrongPrefix => "WrongPrefix",
            Rule::WrongName => "WrongName",
            Rule::Conflict => "Conflict",
            Rule::WrongTerminator => "WrongTerminator",
            Rule::MultilineComment => "MultilineComment",
        }
    }
}

/// A style violation in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Rule that was violated
    pub rule: Rule,
    /// File the violation was found in
    pub path: String,
    /// Human-readable description, path included
    pub message: String,
    /// Line number (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Violation {
    fn new(rule: Rule, path: impl fmt::Display, message: String) -> Self {
        Self {
            rule,
            path: path.to_string(),
            message,
            line: None,
        }
    }

    pub fn missing_guard(path: &SourcePath) -> Self {
        Self::new(
            Rule::MissingGuard,
            path,
            format!("{} doesn't seem to be protected by a proper include guard.", path),
        )
    }

    pub fn mismatched_open_define(path: &SourcePath, open: &str, define: &str) -> Self {
        Self::new(
            Rule::MismatchedOpenDefine,
            path,
            format!(
                "{} begins with a malformed include guard (#ifndef {}, #define {}).",
                path, open, define
            ),
        )
    }

    pub fn wrong_prefix(path: &SourcePath, prefix: &RequiredPrefix) -> Self {
        Self::new(
            Rule::WrongPrefix,
            path,
            format!("{} include guard should begin with {}", path, prefix),
        )
    }

    pub fn wrong_name(path: &SourcePath, expected: &str) -> Self {
        Self::new(
            Rule::WrongName,
            path,
            format!("{} include guard should be named {}", path, expected),
        )
    }

    /// `other` is the file that claimed the name first.
    pub fn conflict(path: &SourcePath, other: &SourcePath) -> Self {
        Self::new(
            Rule::Conflict,
            path,
            format!(
                "There's an include guard conflict between {} and {}",
                path, other
            ),
        )
    }

    pub fn wrong_terminator(path: &SourcePath, expected_line: &str) -> Self {
        Self::new(
            Rule::WrongTerminator,
            path,
            format!("{} should end with {}", path, expected_line),
        )
    }

    pub fn multiline_comment(path: impl fmt::Display) -> Self {
        let message = format!(
            "{} is using multiline comments. Only //-style comments are allowed.",
            path
        );
        Self::new(Rule::MultilineComment, path, message)
    }

    /// Add line number.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Format for display: the message, one line.
    pub fn format(&self) -> String {
        self.message.clone()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of validating one file.
///
/// Rule failures are values, not errors: one file's rejection never stops
/// the rest of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Every rule passed
    Accepted,
    /// The first rule that failed
    Rejected(Violation),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }

    /// Rule that rejected the file, if any.
    pub fn rule(&self) -> Option<Rule> {
        self.violation().map(|v| v.rule)
    }

    pub fn violation(&self) -> Option<&Violation> {
        match self {
            ValidationOutcome::Accepted => None,
            ValidationOutcome::Rejected(v) => Some(v),
        }
    }

    pub fn into_violation(self) -> Option<Violation> {
        match self {
            ValidationOutcome::Accepted => None,
            ValidationOutcome::Rejected(v) => Some(v),
        }
    }
}
