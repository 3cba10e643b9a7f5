//! Guard names derived from file paths.

use kl_core::{RequiredPrefix, SourcePath};

/// Computes the guard name a header must use.
///
/// The name is the prefix followed by every path segment below the root,
/// uppercased, with characters outside `[A-Za-z0-9_]` replaced by `_`, and
/// the segments joined by `_`:
///
/// ```
/// use kl_core::{RequiredPrefix, SourcePath};
/// use kl_quality::NameDeriver;
///
/// let path = SourcePath::new("kudos", vec!["include".into(), "mm".into(), "kmalloc.h".into()]);
/// let name = NameDeriver::new().derive(&RequiredPrefix::kernel(), &path);
/// assert_eq!(name, "KUDOS_INCLUDE_MM_KMALLOC_H");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NameDeriver;

impl NameDeriver {
    /// Create a new deriver.
    pub fn new() -> Self {
        Self
    }

    /// Expected guard name for `path` under a root with `prefix`.
    pub fn derive(&self, prefix: &RequiredPrefix, path: &SourcePath) -> String {
        self.derive_segments(prefix.as_str(), path.segments())
    }

    /// Expected guard name from raw segments.
    pub fn derive_segments<S: AsRef<str>>(&self, prefix: &str, segments: &[S]) -> String {
        let parts: Vec<String> = segments
            .iter()
            .map(|s| transliterate(s.as_ref()))
            .collect();
        format!("{}{}", prefix, parts.join("_"))
    }
}

/// `kmalloc.h` -> `KMALLOC_H`, `ä` -> `_`.
fn transliterate(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
