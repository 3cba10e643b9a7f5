//! Run-level aggregation of violations.

use serde::Serialize;

use crate::violation::{Rule, ValidationOutcome, Violation};

/// Result of checking a set of files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Number of files checked
    pub files_checked: usize,
    /// All violations found, in the order files were checked
    pub violations: Vec<Violation>,
}

impl CheckReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from violations.
    pub fn from_violations(files_checked: usize, violations: Vec<Violation>) -> Self {
        Self {
            files_checked,
            violations,
        }
    }

    /// Record the outcome of one file.
    pub fn record(&mut self, outcome: ValidationOutcome) {
        self.files_checked += 1;
        if let Some(v) = outcome.into_violation() {
            self.violations.push(v);
        }
    }

    /// Append another report's files and violations.
    pub fn merge(&mut self, other: CheckReport) {
        self.files_checked += other.files_checked;
        self.violations.extend(other.violations);
    }

    /// Whether no violation was reported.
    pub fn passes(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of violations of one rule.
    pub fn count(&self, rule: Rule) -> usize {
        self.violations.iter().filter(|v| v.rule == rule).count()
    }

    /// One line per violation, nothing for a clean run.
    pub fn format_lines(&self) -> String {
        let mut out = String::new();
        for violation in &self.violations {
            out.push_str(&violation.format());
            out.push('\n');
        }
        out
    }

    /// Short summary, e.g. for logging.
    pub fn format_summary(&self) -> String {
        let mut summary = format!(
            "{} files checked, {} violations",
            self.files_checked,
            self.violations.len()
        );
        let per_rule: Vec<String> = Rule::ALL
            .iter()
            .filter_map(|&rule| match self.count(rule) {
                0 => None,
                n => Some(format!("{} {}", n, rule.name())),
            })
            .collect();
        if !per_rule.is_empty() {
            summary.push_str(&format!(" ({})", per_rule.join(", ")));
        }
        summary
    }
}
