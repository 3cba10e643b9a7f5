//! Structural guard matching on normalized text.

use regex::Regex;

/// `#ifndef A` then `#define B` after at least one leading line, with the
/// text ending in `#endif` and trailing whitespace. Dot-all and unanchored
/// in between, so anything may precede the guard.
const GUARD_PATTERN: &str = r"(?s)\A.*?\n\s*#ifndef\s+(\S+)\s+#define\s+(\S+).*?#endif\s+\z";

/// Identifiers extracted from a guard structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGuard {
    /// Identifier after `#ifndef`
    pub open_name: String,
    /// Identifier after `#define`
    pub define_name: String,
}

impl CandidateGuard {
    /// Whether `#ifndef` and `#define` name the same identifier.
    pub fn is_consistent(&self) -> bool {
        self.open_name == self.define_name
    }
}

/// Finds the guard structure in normalized text.
pub struct GuardMatcher {
    pattern: Regex,
}

impl GuardMatcher {
    /// Create a new matcher.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(GUARD_PATTERN).expect("guard pattern is valid"),
        }
    }

    /// Extract the guard identifiers, or `None` if the structure is absent.
    pub fn find(&self, normalized: &str) -> Option<CandidateGuard> {
        let caps = self.pattern.captures(normalized)?;
        Some(CandidateGuard {
            open_name: caps[1].to_string(),
            define_name: caps[2].to_string(),
        })
    }
}

impl Default for GuardMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(text: &str) -> Option<CandidateGuard> {
        GuardMatcher::new().find(text)
    }

    #[test]
    fn test_find_guard() {
        let text = "# 1 \"a.h\"\n#ifndef KUDOS_A_H\n#define KUDOS_A_H\n\nint a;\n\n#endif \n";
        let guard = find(text).unwrap();
        assert_eq!(guard.open_name, "KUDOS_A_H");
        assert_eq!(guard.define_name, "KUDOS_A_H");
        assert!(guard.is_consistent());
    }

    #[test]
    fn test_mismatched_names_are_extracted() {
        let text = "# 1 \"a.h\"\n#ifndef KUDOS_A_H\n#define KUDOS_B_H\n#endif\n";
        let guard = find(text).unwrap();
        assert_eq!(guard.define_name, "KUDOS_B_H");
        assert!(!guard.is_consistent());
    }

    #[test]
    fn test_guard_needs_leading_line() {
        assert!(find("#ifndef A\n#define A\n#endif\n").is_none());
        assert!(find("\n#ifndef A\n#define A\n#endif\n").is_some());
    }

    #[test]
    fn test_define_must_follow_ifndef() {
        let text = "# 1 \"a.h\"\n#ifndef A\nint x;\n#define A\n#endif\n";
        assert!(find(text).is_none());
    }

    #[test]
    fn test_must_end_with_endif() {
        assert!(find("# 1\n#ifndef A\n#define A\n#endif\nint x;\n").is_none());
        assert!(find("# 1\n#ifndef A\n#define A\n#endif").is_none());
        assert!(find("# 1\n#ifndef A\n#define A\n").is_none());
    }

    #[test]
    fn test_content_before_guard_is_allowed() {
        let text = "# 1 \"a.h\"\nint early;\n\n  #ifndef A\n#define A\n#endif\n";
        assert_eq!(find(text).unwrap().open_name, "A");
    }

    #[test]
    fn test_first_ifndef_wins() {
        let text = "# 1\n#ifndef A\n#define A\n#ifndef B\n#define B\n#endif\n#endif\n";
        assert_eq!(find(text).unwrap().open_name, "A");

        // An unrelated #ifndef before the guard is taken as the guard.
        let text = "# 1\n#ifndef DEBUG\n#define NDEBUG\n#endif\n#ifndef A\n#define A\n#endif\n";
        let guard = find(text).unwrap();
        assert_eq!(guard.open_name, "DEBUG");
        assert!(!guard.is_consistent());
    }
}
