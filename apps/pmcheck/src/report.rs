//! Pass/warning/error tally for a run.

use crate::models::{Severity, Summary, ValidationResult};

#[derive(Debug, Default, Clone)]
/// Counters only; per-file detail lives in `CheckResult`.
pub struct Report {
    summary: Summary,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &ValidationResult) {
        match result {
            ValidationResult::NotFound => self.summary.warnings += 1,
            ValidationResult::ParseError(_) => self.summary.errors += 1,
            ValidationResult::Validated(violations) => {
                self.summary.successes += 1;
                for v in violations {
                    match v.severity {
                        Severity::Warning => self.summary.warnings += 1,
                        Severity::Error => self.summary.errors += 1,
                    }
                }
            }
        }
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// 1 when any hard error was recorded; warnings never fail a run.
    pub fn exit_code(&self) -> i32 {
        self.summary.exit_code()
    }
}
