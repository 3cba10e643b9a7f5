//! Errors that abort a run.

use std::path::PathBuf;

use kl_normalize::NormalizeError;

/// Environment failure. Style violations are never reported through this.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Failed to walk {}: {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Invalid guard root `{0}`, expected PATH=PREFIX")]
    GuardRootSpec(String),
}
