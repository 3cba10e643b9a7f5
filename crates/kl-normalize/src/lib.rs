//! # kl-normalize
//!
//! Normalization of C sources before structural matching.
//!
//! A [`Normalizer`] takes a file's raw text and returns it with comments
//! stripped and preprocessor directives left in place, one directive per
//! line. Two strategies are provided:
//!
//! | Strategy | Backing | Use |
//! |----------|---------|-----|
//! | [`PreprocessorNormalizer`] | `gcc -fpreprocessed -dD -E` | Default |
//! | [`CommentStripper`] | in-process scanner | Tests, hosts without a C toolchain |
//!
//! Both emit a leading `# 1 "<path>"` line marker, so the first directive of
//! the file is never on the first line of the output.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod preprocessor;
pub mod strip;

pub use preprocessor::{PreprocessorConfig, PreprocessorNormalizer};
pub use strip::CommentStripper;

/// Strips comments from C source text.
///
/// Implementations must be deterministic and must not modify the file.
pub trait Normalizer {
    /// Normalize the file at `path` whose contents are `raw`.
    fn normalize(&self, path: &Path, raw: &str) -> Result<String, NormalizeError>;
}

impl<N: Normalizer + ?Sized> Normalizer for &N {
    fn normalize(&self, path: &Path, raw: &str) -> Result<String, NormalizeError> {
        (**self).normalize(path, raw)
    }
}

impl<N: Normalizer + ?Sized> Normalizer for Box<N> {
    fn normalize(&self, path: &Path, raw: &str) -> Result<String, NormalizeError> {
        (**self).normalize(path, raw)
    }
}

/// Normalization could not run at all.
///
/// These are environment errors, not style violations: a run that hits one
/// is aborted.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("Failed to run preprocessor `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Preprocessor `{program}` timed out after {timeout:?} on {}", .path.display())]
    Timeout {
        program: String,
        path: PathBuf,
        timeout: Duration,
    },

    #[error("Failed to start preprocessor runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
