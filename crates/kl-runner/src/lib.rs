//! # kl-runner
//!
//! Drives the style checks over source trees.
//!
//! | Check | Roots | Files |
//! |-------|-------|-------|
//! | Include guards | `kudos` (`KUDOS_`), `userland` (`KUDOS_USERLAND_`) | `*.h` |
//! | Comments | `.` | `*.h`, `*.c` |
//!
//! Every file is checked and every violation collected; a violation in one
//! file never stops the run. Only environment failures (unreadable files,
//! a preprocessor that cannot run) abort it.
//!
//! ## Usage
//!
//! ```bash
//! # Both checks with the KUDOS defaults
//! cargo run -p kl-runner --features cli --bin kudos-lint -- check
//!
//! # Guards only, custom roots, no gcc needed
//! cargo run -p kl-runner --features cli --bin kudos-lint -- guards \
//!     --root kudos=KUDOS_ --root userland=KUDOS_USERLAND_ --builtin-normalizer
//! ```

pub mod config;
pub mod error;
pub mod runner;
pub mod walk;

pub use config::{GuardRoot, LintConfig};
pub use error::RunError;
pub use runner::Runner;
pub use walk::SourceWalker;
