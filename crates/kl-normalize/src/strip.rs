//! In-process comment stripper.
//!
//! Produces the same shape of output as `gcc -fpreprocessed -dD -E` for the
//! purposes of guard matching: a `# 1 "<path>"` marker line, then the source
//! with comments removed. Line structure is kept: a block comment becomes a
//! single space followed by the newlines it spanned, and the output always
//! ends with a newline.

use std::path::Path;

use crate::{NormalizeError, Normalizer};

/// Normalizer that strips comments without an external tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentStripper;

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment,
    StringLiteral,
    CharLiteral,
}

impl CommentStripper {
    /// Create a new stripper.
    pub fn new() -> Self {
        Self
    }

    /// Remove `//` and `/* */` comments outside string and character literals.
    ///
    /// An unterminated block comment runs to the end of the text.
    pub fn strip(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut state = State::Code;
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            match state {
                State::Code => match c {
                    '/' if chars.peek() == Some(&'/') => {
                        chars.next();
                        state = State::LineComment;
                    }
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        out.push(' ');
                        state = State::BlockComment;
                    }
                    '"' => {
                        out.push(c);
                        state = State::StringLiteral;
                    }
                    '\'' => {
                        out.push(c);
                        state = State::CharLiteral;
                    }
                    _ => out.push(c),
                },
                State::LineComment => {
                    if c == '\n' {
                        out.push(c);
                        state = State::Code;
                    }
                }
                State::BlockComment => match c {
                    '*' if chars.peek() == Some(&'/') => {
                        chars.next();
                        state = State::Code;
                    }
                    '\n' => out.push(c),
                    _ => {}
                },
                State::StringLiteral | State::CharLiteral => {
                    out.push(c);
                    let close = if state == State::StringLiteral { '"' } else { '\'' };
                    if c == '\\' {
                        if let Some(escaped) = chars.next() {
                            out.push(escaped);
                        }
                    } else if c == close || c == '\n' {
                        state = State::Code;
                    }
                }
            }
        }

        out
    }
}

impl Normalizer for CommentStripper {
    fn normalize(&self, path: &Path, raw: &str) -> Result<String, NormalizeError> {
        let mut out = format!("# 1 \"{}\"\n{}", path.display(), self.strip(raw));
        // gcc always terminates its output with a newline
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_comments() {
        let stripper = CommentStripper::new();
        assert_eq!(stripper.strip("int x; // counter\nint y;\n"), "int x; \nint y;\n");
        assert_eq!(stripper.strip("#endif // KUDOS_A_H\n"), "#endif \n");
    }

    #[test]
    fn test_strip_block_comment_keeps_lines() {
        let stripper = CommentStripper::new();
        let out = stripper.strip("a /* one\ntwo\nthree */ b\n");
        assert_eq!(out, "a  \n\n b\n");
        assert_eq!(out.lines().count(), "a /* one\ntwo\nthree */ b\n".lines().count());
    }

    #[test]
    fn test_literals_are_not_comments() {
        let stripper = CommentStripper::new();
        let code = "char *s = \"// not /* a comment\";\nchar c = '/';\n";
        assert_eq!(stripper.strip(code), code);

        let escaped = "char *s = \"quote \\\" // still string\"; // gone\n";
        assert_eq!(
            stripper.strip(escaped),
            "char *s = \"quote \\\" // still string\"; \n"
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let stripper = CommentStripper::new();
        assert_eq!(stripper.strip("a /* never\nclosed"), "a  \n");
    }

    #[test]
    fn test_normalize_adds_line_marker() {
        let out = CommentStripper::new()
            .normalize(Path::new("kudos/a.h"), "#ifndef A\n")
            .unwrap();
        assert_eq!(out, "# 1 \"kudos/a.h\"\n#ifndef A\n");

        let out = CommentStripper::new()
            .normalize(Path::new("a.h"), "#endif")
            .unwrap();
        assert!(out.ends_with("#endif\n"));
    }
}
