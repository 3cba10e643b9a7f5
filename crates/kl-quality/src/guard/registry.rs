//! Guard names claimed during one run.

use std::collections::hash_map::{Entry, HashMap};

use kl_core::SourcePath;

/// A guard name is already claimed by another file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("guard {name} is already claimed by {existing}")]
pub struct RegistryConflict {
    /// Contested guard name
    pub name: String,
    /// File that claimed it first
    pub existing: SourcePath,
}

/// Maps each guard name to the first file that claimed it.
///
/// One registry lives for exactly one run. It is handed to every
/// validation call of that run and dropped at the end, so separate runs
/// never see each other's claims. Validating files in parallel requires
/// serializing access to it.
#[derive(Debug, Default)]
pub struct GuardRegistry {
    claims: HashMap<String, SourcePath>,
}

impl GuardRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `name` for `path`.
    ///
    /// Claiming a name again for the same file succeeds.
    pub fn claim(&mut self, name: &str, path: &SourcePath) -> Result<(), RegistryConflict> {
        match self.claims.entry(name.to_string()) {
            Entry::Occupied(entry) if entry.get() != path => Err(RegistryConflict {
                name: name.to_string(),
                existing: entry.get().clone(),
            }),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(entry) => {
                entry.insert(path.clone());
                Ok(())
            }
        }
    }

    /// File that claimed `name`, if any.
    pub fn owner(&self, name: &str) -> Option<&SourcePath> {
        self.claims.get(name)
    }

    /// Number of claimed names.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
