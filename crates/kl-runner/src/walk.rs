//! Source file enumeration.

use std::path::{Component, Path, PathBuf};

use kl_core::SourcePath;
use walkdir::WalkDir;

use crate::error::RunError;

/// Lists files with given extensions below a root, in file name order.
#[derive(Debug, Clone)]
pub struct SourceWalker {
    extensions: Vec<String>,
    excluded: Vec<PathBuf>,
}

impl SourceWalker {
    /// Create a walker matching `extensions` (without the dot).
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            excluded: Vec::new(),
        }
    }

    /// Skip these directories entirely.
    ///
    /// Compared lexically with `.` components dropped, so `./kudos/userland`
    /// and `kudos/userland` name the same directory.
    pub fn excluding<I>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.excluded.extend(dirs.into_iter().map(|d| lexical_key(&d)));
        self
    }

    /// Files below `root`. A missing root yields no files.
    ///
    /// Symlinked files are listed; symlinked directories are not entered.
    pub fn collect(&self, root: &Path) -> Result<Vec<SourcePath>, RunError> {
        if !root.is_dir() {
            tracing::warn!(root = %root.display(), "root directory not found, skipping");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let entries = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !(e.depth() > 0 && e.file_type().is_dir() && self.is_excluded(e.path())));

        for entry in entries {
            let entry = entry.map_err(|source| RunError::Walk {
                root: root.to_path_buf(),
                source,
            })?;
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file || !self.matches(entry.path()) {
                continue;
            }
            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            files.push(SourcePath::from_relative(root, rel));
        }

        tracing::debug!(root = %root.display(), files = files.len(), "walked root");
        Ok(files)
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn is_excluded(&self, dir: &Path) -> bool {
        let dir = lexical_key(dir);
        self.excluded.iter().any(|e| *e == dir)
    }
}

/// `path` without `.` components, for comparing roots as typed by users.
pub(crate) fn lexical_key(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
