//! Per-header guard validation.

use kl_core::{RequiredPrefix, SourcePath, ValidationOutcome, Violation};
use kl_normalize::{NormalizeError, Normalizer};

use super::matcher::GuardMatcher;
use super::naming::NameDeriver;
use super::registry::GuardRegistry;

/// Validates the include guard of one header at a time.
///
/// Holds no run state: the registry of claimed names is passed in by the
/// caller for each call.
pub struct GuardValidator<N> {
    normalizer: N,
    matcher: GuardMatcher,
    deriver: NameDeriver,
}

impl<N: Normalizer> GuardValidator<N> {
    /// Create a validator using `normalizer` to strip comments.
    pub fn new(normalizer: N) -> Self {
        Self {
            normalizer,
            matcher: GuardMatcher::new(),
            deriver: NameDeriver::new(),
        }
    }

    /// Validate one header whose contents are `raw`.
    ///
    /// Stops at the first failing rule. A name is recorded in `registry`
    /// once the file has the right guard name, even if its last line turns
    /// out to be wrong. Only a normalizer failure is an `Err`.
    pub fn validate(
        &self,
        registry: &mut GuardRegistry,
        path: &SourcePath,
        prefix: &RequiredPrefix,
        raw: &str,
    ) -> Result<ValidationOutcome, NormalizeError> {
        let normalized = self.normalizer.normalize(&path.to_path_buf(), raw)?;

        let Some(guard) = self.matcher.find(&normalized) else {
            return Ok(reject(Violation::missing_guard(path)));
        };

        if !guard.is_consistent() {
            return Ok(reject(Violation::mismatched_open_define(
                path,
                &guard.open_name,
                &guard.define_name,
            )));
        }
        let name = guard.open_name;

        if !name.starts_with(prefix.as_str()) {
            return Ok(reject(Violation::wrong_prefix(path, prefix)));
        }

        let expected = self.deriver.derive(prefix, path);
        if name != expected {
            return Ok(reject(Violation::wrong_name(path, &expected)));
        }

        if let Err(conflict) = registry.claim(&expected, path) {
            return Ok(reject(Violation::conflict(path, &conflict.existing)));
        }

        let terminator = expected_terminator(&name);
        if last_line(raw) != Some(terminator.as_str()) {
            return Ok(reject(Violation::wrong_terminator(path, &terminator)));
        }

        Ok(ValidationOutcome::Accepted)
    }
}

fn reject(violation: Violation) -> ValidationOutcome {
    ValidationOutcome::Rejected(violation)
}

/// The line a header guarded by `name` must end with.
pub fn expected_terminator(name: &str) -> String {
    format!("#endif // {}", name)
}

/// Last non-empty line of the raw text.
fn last_line(raw: &str) -> Option<&str> {
    raw.lines().rev().find(|line| !line.is_empty())
}
