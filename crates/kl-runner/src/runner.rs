//! Run orchestration.

use std::path::PathBuf;

use kl_core::{CheckReport, SourcePath};
use kl_normalize::Normalizer;
use kl_quality::{CommentChecker, GuardRegistry, GuardValidator};

use crate::config::{GuardRoot, LintConfig};
use crate::error::RunError;
use crate::walk::{lexical_key, SourceWalker};

/// Runs the style checks described by a [`LintConfig`].
pub struct Runner<N> {
    config: LintConfig,
    validator: GuardValidator<N>,
    comments: CommentChecker,
}

impl<N: Normalizer> Runner<N> {
    /// Create a runner normalizing headers with `normalizer`.
    pub fn new(config: LintConfig, normalizer: N) -> Self {
        Self {
            config,
            validator: GuardValidator::new(normalizer),
            comments: CommentChecker::new(),
        }
    }

    /// Check the include guard of every header under the guard roots.
    ///
    /// All roots share one registry, so a name clash across roots is a
    /// conflict too. A root nested in another is only walked as itself.
    pub fn run_guards(&self) -> Result<CheckReport, RunError> {
        let mut registry = GuardRegistry::new();
        let mut report = CheckReport::new();

        for root in &self.config.guard_roots {
            let walker = SourceWalker::new(self.config.guard_extensions.iter().cloned())
                .excluding(self.other_roots(root));

            for path in walker.collect(&root.path)? {
                let raw = read_source(&path)?;
                let outcome = self
                    .validator
                    .validate(&mut registry, &path, &root.prefix, &raw)?;
                tracing::debug!(
                    path = %path,
                    prefix = %root.prefix,
                    rule = ?outcome.rule(),
                    "checked include guard"
                );
                report.record(outcome);
            }
        }

        tracing::info!(claimed = registry.len(), "guards: {}", report.format_summary());
        Ok(report)
    }

    /// Check every source file under the comment roots for block comments.
    pub fn run_comments(&self) -> Result<CheckReport, RunError> {
        let walker = SourceWalker::new(self.config.comment_extensions.iter().cloned());
        let mut report = CheckReport::new();

        for root in &self.config.comment_roots {
            for path in walker.collect(root)? {
                let code = read_source(&path)?;
                report.files_checked += 1;
                if let Some(violation) = self.comments.check(&path, &code) {
                    tracing::debug!(path = %path, line = ?violation.line, "block comment");
                    report.violations.push(violation);
                }
            }
        }

        tracing::info!("comments: {}", report.format_summary());
        Ok(report)
    }

    /// Guard check, then comment check, in one report.
    pub fn run_all(&self) -> Result<CheckReport, RunError> {
        let mut report = self.run_guards()?;
        report.merge(self.run_comments()?);
        Ok(report)
    }

    fn other_roots(&self, root: &GuardRoot) -> Vec<PathBuf> {
        let own = lexical_key(&root.path);
        self.config
            .guard_roots
            .iter()
            .filter(|r| lexical_key(&r.path) != own)
            .map(|r| r.path.clone())
            .collect()
    }
}

/// Read a file, decoding it lossily as UTF-8.
fn read_source(path: &SourcePath) -> Result<String, RunError> {
    let full = path.to_path_buf();
    let bytes = std::fs::read(&full).map_err(|source| RunError::Read { path: full, source })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use kl_core::{RequiredPrefix, Rule};
    use kl_normalize::CommentStripper;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn guarded(name: &str) -> String {
        format!("#ifndef {0}\n#define {0}\n\nint x;\n\n#endif // {0}\n", name)
    }

    fn config(base: &Path) -> LintConfig {
        LintConfig {
            guard_roots: vec![
                GuardRoot::new(base.join("kudos"), RequiredPrefix::kernel()),
                GuardRoot::new(base.join("kudos").join("userland"), RequiredPrefix::userland()),
            ],
            comment_roots: vec![base.to_path_buf()],
            ..LintConfig::kudos()
        }
    }

    fn runner(base: &Path) -> Runner<CommentStripper> {
        Runner::new(config(base), CommentStripper::new())
    }

    #[test]
    fn test_clean_tree_passes() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        write(base, "kudos/include/mm/kmalloc.h", &guarded("KUDOS_INCLUDE_MM_KMALLOC_H"));
        write(base, "kudos/kernel/thread.h", &guarded("KUDOS_KERNEL_THREAD_H"));
        write(base, "kudos/kernel/thread.c", "// Threads.\nint x;\n");
        write(base, "kudos/userland/lib.h", &guarded("KUDOS_USERLAND_LIB_H"));

        let report = runner(base).run_all().unwrap();
        assert!(report.passes(), "{}", report.format_lines());
        // 3 headers, then 4 sources for comments
        assert_eq!(report.files_checked, 7);
    }

    #[test]
    fn test_nested_root_uses_its_own_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        write(base, "kudos/userland/lib.h", &guarded("KUDOS_USERLAND_LIB_H"));
        write(base, "kudos/userland/shell.h", &guarded("KUDOS_USERLAND_SHELL_H_X"));

        let report = runner(base).run_guards().unwrap();
        assert_eq!(report.files_checked, 2);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].rule, Rule::WrongName);
        assert!(report.violations[0]
            .message
            .ends_with("should be named KUDOS_USERLAND_SHELL_H"));
    }

    #[test]
    fn test_nested_root_spelled_differently_is_checked_once() {
        // Relative roots, one with a leading `./`, below the working directory.
        let dir = tempfile::tempdir_in(".").unwrap();
        let name = PathBuf::from(dir.path().file_name().unwrap());
        write(&name, "kudos/userland/lib.h", &guarded("KUDOS_USERLAND_LIB_H"));
        write(&name, "kudos/kernel/thread.h", &guarded("KUDOS_KERNEL_THREAD_H"));

        let config = LintConfig {
            guard_roots: vec![
                GuardRoot::new(Path::new(".").join(&name).join("kudos"), RequiredPrefix::kernel()),
                GuardRoot::new(name.join("kudos").join("userland"), RequiredPrefix::userland()),
            ],
            ..LintConfig::kudos()
        };
        let report = Runner::new(config, CommentStripper::new()).run_guards().unwrap();
        assert!(report.passes(), "{}", report.format_lines());
        assert_eq!(report.files_checked, 2);
    }

    #[test]
    fn test_every_violation_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        write(base, "kudos/a.h", "int a;\n");
        write(base, "kudos/b.h", &guarded("KUDOS_B"));
        write(base, "kudos/c.h", &guarded("OTHER_C_H"));
        write(base, "kudos/d.h", "#ifndef KUDOS_D_H\n#define KUDOS_D_H\n#endif\n");
        write(base, "kudos/e.h", &guarded("KUDOS_E_H"));

        let report = runner(base).run_guards().unwrap();
        assert_eq!(report.files_checked, 5);
        let rules: Vec<Rule> = report.violations.iter().map(|v| v.rule).collect();
        assert_eq!(
            rules,
            [Rule::MissingGuard, Rule::WrongName, Rule::WrongPrefix, Rule::WrongTerminator]
        );
    }

    #[test]
    fn test_conflict_within_run() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        write(base, "kudos/a/b.h", &guarded("KUDOS_A_B_H"));
        write(base, "kudos/a_b.h", &guarded("KUDOS_A_B_H"));

        let report = runner(base).run_guards().unwrap();
        assert_eq!(report.count(Rule::Conflict), 1);
        let message = &report.violations[0].message;
        assert!(message.contains(&base.join("kudos").join("a").join("b.h").display().to_string()));
        assert!(message.contains(&base.join("kudos").join("a_b.h").display().to_string()));
    }

    #[test]
    fn test_runs_do_not_share_registry() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        write(base, "kudos/a.h", &guarded("KUDOS_A_H"));

        let runner = runner(base);
        assert!(runner.run_guards().unwrap().passes());
        assert!(runner.run_guards().unwrap().passes());
    }

    #[test]
    fn test_block_comments_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        write(base, "kudos/lib/libc.c", "/*\n * libc\n */\nint x;\n");
        write(base, "kudos/lib/debug.c", "// debug\nint y;\n");
        write(base, "tools/notes.txt", "/* not source */\n");

        let report = runner(base).run_comments().unwrap();
        assert_eq!(report.files_checked, 2);
        assert_eq!(report.count(Rule::MultilineComment), 1);
        assert_eq!(report.violations[0].line, Some(1));
        assert!(report.violations[0].path.ends_with("libc.c"));
    }

    #[test]
    fn test_missing_roots_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let report = runner(dir.path()).run_guards().unwrap();
        assert_eq!(report.files_checked, 0);
        assert!(report.passes());
    }
}
