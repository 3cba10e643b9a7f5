//! # kl-quality
//!
//! Style checkers for the KUDOS C sources.
//!
//! ## Include guards (MUST pass)
//! - Exactly one `#ifndef NAME` / `#define NAME` / `#endif` guard
//! - `NAME` begins with the root's prefix
//! - `NAME` is the prefix followed by the file's path, uppercased, with
//!   every character outside `[A-Za-z0-9_]` replaced by `_`
//! - No two headers in a run share a guard name
//! - The last line is `#endif // NAME`
//!
//! ## Comments (MUST pass)
//! - Only `//` comments in `.h` and `.c` files

pub mod comments;
pub mod guard;

pub use comments::CommentChecker;
pub use guard::{
    CandidateGuard, GuardMatcher, GuardRegistry, GuardValidator, NameDeriver, RegistryConflict,
};
