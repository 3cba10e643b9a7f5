//! Run configuration.
//!
//! Defaults describe the KUDOS tree. A JSON file can override any field;
//! command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};

use kl_core::RequiredPrefix;
use kl_normalize::PreprocessorConfig;
use serde::Deserialize;

use crate::error::RunError;

/// A directory whose headers must use guards starting with `prefix`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuardRoot {
    pub path: PathBuf,
    pub prefix: RequiredPrefix,
}

impl GuardRoot {
    pub fn new(path: impl Into<PathBuf>, prefix: RequiredPrefix) -> Self {
        Self {
            path: path.into(),
            prefix,
        }
    }

    /// Parse `PATH=PREFIX`, e.g. `kudos=KUDOS_`.
    pub fn parse(spec: &str) -> Result<Self, RunError> {
        match spec.rsplit_once('=') {
            Some((path, prefix)) if !path.is_empty() => {
                Ok(Self::new(path, RequiredPrefix::new(prefix)))
            }
            _ => Err(RunError::GuardRootSpec(spec.to_string())),
        }
    }
}

/// Configuration for a style run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Roots for the guard check, each with its prefix
    pub guard_roots: Vec<GuardRoot>,
    /// Roots for the comment check
    pub comment_roots: Vec<PathBuf>,
    /// Extensions of files whose guards are checked
    pub guard_extensions: Vec<String>,
    /// Extensions of files whose comments are checked
    pub comment_extensions: Vec<String>,
    /// External preprocessor used for normalization
    pub preprocessor: PreprocessorConfig,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self::kudos()
    }
}

impl LintConfig {
    /// The KUDOS layout: `kudos/` and `userland/` below the working directory.
    pub fn kudos() -> Self {
        Self {
            guard_roots: vec![
                GuardRoot::new("kudos", RequiredPrefix::kernel()),
                GuardRoot::new("userland", RequiredPrefix::userland()),
            ],
            comment_roots: vec![PathBuf::from(".")],
            guard_extensions: vec!["h".to_string()],
            comment_extensions: vec!["h".to_string(), "c".to_string()],
            preprocessor: PreprocessorConfig::default(),
        }
    }

    /// Parse from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, RunError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, RunError> {
        let json = std::fs::read_to_string(path).map_err(|source| RunError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
