//! File locations and per-root guard prefixes.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Location of a source file relative to the root it was found under.
///
/// `segments` are the directory names and file name below the root
/// directory. The root's own name is never part of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePath {
    root: PathBuf,
    segments: Vec<String>,
}

impl SourcePath {
    /// Create from a root and the segments below it.
    pub fn new(root: impl Into<PathBuf>, segments: Vec<String>) -> Self {
        debug_assert!(!segments.is_empty(), "SourcePath needs at least a file name");
        Self {
            root: root.into(),
            segments,
        }
    }

    /// Create from a root and a path relative to that root.
    ///
    /// `.` components are dropped; anything that is not a plain name is
    /// ignored as well, so `a/./b.h` and `a/b.h` are the same location.
    pub fn from_relative(root: impl Into<PathBuf>, relative: &Path) -> Self {
        let segments = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Self::new(root, segments)
    }

    /// Root directory this path is relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Segments below the root, file name last.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Full path as it should be opened and reported.
    pub fn to_path_buf(&self) -> PathBuf {
        let mut path = self.root.clone();
        path.extend(&self.segments);
        path
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path_buf().display())
    }
}

/// Leading token every guard name under a given root must carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequiredPrefix(String);

impl RequiredPrefix {
    /// Prefix for the kernel tree.
    pub const KERNEL: &'static str = "KUDOS_";
    /// Prefix for the userland tree.
    pub const USERLAND: &'static str = "KUDOS_USERLAND_";

    /// Create a prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self(prefix.into())
    }

    /// Kernel tree prefix (`KUDOS_`).
    pub fn kernel() -> Self {
        Self::new(Self::KERNEL)
    }

    /// Userland tree prefix (`KUDOS_USERLAND_`).
    pub fn userland() -> Self {
        Self::new(Self::USERLAND)
    }

    /// The prefix text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequiredPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_relative_drops_cur_dir() {
        let path = SourcePath::from_relative("kudos", Path::new("./include/mm/kmalloc.h"));
        assert_eq!(path.segments(), ["include", "mm", "kmalloc.h"]);
        assert_eq!(path.root(), Path::new("kudos"));
    }

    #[test]
    fn test_display_joins_root_and_segments() {
        let path = SourcePath::new("kudos", vec!["lib".into(), "libc.h".into()]);
        assert_eq!(path.to_path_buf(), Path::new("kudos").join("lib").join("libc.h"));
        assert_eq!(path.to_string(), path.to_path_buf().display().to_string());
    }

    #[test]
    fn test_prefix_presets() {
        assert_eq!(RequiredPrefix::kernel().as_str(), "KUDOS_");
        assert_eq!(RequiredPrefix::userland().to_string(), "KUDOS_USERLAND_");
    }
}
