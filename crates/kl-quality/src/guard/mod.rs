//! Include guard checker.
//!
//! Validation of one header runs these steps, stopping at the first
//! failure:
//!
//! 1. Normalize the text (comments stripped)
//! 2. Find the `#ifndef` / `#define` / `#endif` structure
//! 3. `#ifndef` and `#define` name the same identifier
//! 4. The identifier starts with the root's prefix
//! 5. The identifier equals the name derived from the path
//! 6. No other file in the run claimed the name
//! 7. The raw text's last non-empty line is `#endif // NAME`

mod matcher;
mod naming;
mod registry;
mod validator;

pub use matcher::{CandidateGuard, GuardMatcher};
pub use naming::NameDeriver;
pub use registry::{GuardRegistry, RegistryConflict};
pub use validator::GuardValidator;
