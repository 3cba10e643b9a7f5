//! # kl-core
//!
//! Core types for the KUDOS source style checker.
//!
//! Two conventions are enforced over a C source tree:
//!
//! | Rule | Files | Requirement |
//! |------|-------|-------------|
//! | Comments | `.h`, `.c` | Only `//` comments |
//! | Include guards | `.h` | One guard named after the file's path |
//!
//! This crate only holds the data model shared by the checkers and the
//! runner. It performs no I/O.

pub mod report;
pub mod source;
pub mod violation;

pub use report::CheckReport;
pub use source::{RequiredPrefix, SourcePath};
pub use violation::{Rule, ValidationOutcome, Violation};
