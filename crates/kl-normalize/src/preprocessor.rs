//! External C preprocessor strategy.
//!
//! Runs `<program> <args...> <path>` and keeps its stdout. With the default
//! `gcc -fpreprocessed -dD -E`, gcc treats the file as already preprocessed:
//! comments are removed, `#define`s are kept as directives and no header is
//! expanded.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;
use tokio::runtime::Runtime;

use crate::{NormalizeError, Normalizer};

/// Preprocessor invocation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreprocessorConfig {
    /// Executable to run
    pub program: String,
    /// Arguments placed before the file path
    pub args: Vec<String>,
    /// Timeout per file, in seconds
    pub timeout_secs: u64,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            program: "gcc".to_string(),
            args: vec![
                "-fpreprocessed".to_string(),
                "-dD".to_string(),
                "-E".to_string(),
            ],
            timeout_secs: 30,
        }
    }
}

impl PreprocessorConfig {
    /// Timeout per file.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Normalizer backed by an external preprocessor.
///
/// Calls are synchronous: each one drives the child process to completion
/// on a private single-threaded runtime before returning.
pub struct PreprocessorNormalizer {
    config: PreprocessorConfig,
    runtime: Runtime,
}

impl PreprocessorNormalizer {
    /// Create a normalizer with the given config.
    pub fn new(config: PreprocessorConfig) -> Result<Self, NormalizeError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(NormalizeError::Runtime)?;
        Ok(Self { config, runtime })
    }

    async fn run(&self, path: &Path) -> Result<String, NormalizeError> {
        let timeout = self.config.timeout();

        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.args)
            .arg(path)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        match tokio::time::timeout(timeout, cmd.output()).await {
            Ok(Ok(output)) => {
                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    tracing::warn!(
                        program = %self.config.program,
                        path = %path.display(),
                        status = %output.status,
                        "preprocessor failed: {}",
                        first_diagnostic(&stderr)
                    );
                }
                Ok(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(Err(e)) => Err(NormalizeError::Spawn {
                program: self.config.program.clone(),
                source: e,
            }),
            Err(_) => Err(NormalizeError::Timeout {
                program: self.config.program.clone(),
                path: path.to_path_buf(),
                timeout,
            }),
        }
    }
}

impl Normalizer for PreprocessorNormalizer {
    fn normalize(&self, path: &Path, _raw: &str) -> Result<String, NormalizeError> {
        self.runtime.block_on(self.run(path))
    }
}

/// Extract the first error message from preprocessor output.
fn first_diagnostic(stderr: &str) -> &str {
    stderr
        .lines()
        .find(|l| l.contains("error"))
        .or_else(|| stderr.lines().find(|l| !l.trim().is_empty()))
        .unwrap_or("no diagnostic output")
}
