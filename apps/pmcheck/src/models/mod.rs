//! Shared data models for validation targets, results, and policies.

pub mod policy;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
/// Severity attached to a rule; only `Error` affects the exit code.
pub enum Severity {
    #[default]
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// The two Postman document kinds the checker understands.
pub enum DocumentKind {
    Collection,
    Environment,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Collection, DocumentKind::Environment];

    /// Label used in human output, e.g. `[OK] Collection foo.json: Valid`.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Collection => "Collection",
            DocumentKind::Environment => "Environment",
        }
    }

    /// Section header printed before the kind's targets.
    pub fn heading(&self) -> &'static str {
        match self {
            DocumentKind::Collection => "Collections:",
            DocumentKind::Environment => "Environments:",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Collection => f.write_str("collection"),
            DocumentKind::Environment => f.write_str("environment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A path relative to the base directory plus the kind of document expected there.
pub struct FileTarget {
    pub path: String,
    pub kind: DocumentKind,
}

impl FileTarget {
    pub fn new(path: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single failed rule with severity and location.
pub struct Violation {
    pub rule: String,
    pub severity: Severity,
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Terminal outcome of validating one target.
pub enum ValidationResult {
    NotFound,
    ParseError(String),
    Validated(Vec<Violation>),
}

impl ValidationResult {
    /// Stable status token used by the JSON printer.
    pub fn status(&self) -> &'static str {
        match self {
            ValidationResult::NotFound => "not_found",
            ValidationResult::ParseError(_) => "parse_error",
            ValidationResult::Validated(_) => "ok",
        }
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationResult::Validated(v) => v,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
/// Aggregated tally used by printers and for the exit code.
pub struct Summary {
    pub successes: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl Summary {
    /// Process exit status: 1 when any hard error was recorded.
    pub fn exit_code(&self) -> i32 {
        if self.errors > 0 {
            1
        } else {
            0
        }
    }
}

#[derive(Debug, Clone)]
/// One target paired with its outcome, in declared order.
pub struct FileReport {
    pub target: FileTarget,
    pub result: ValidationResult,
}

#[derive(Debug, Clone)]
/// Results container for a whole run.
pub struct CheckResult {
    pub files: Vec<FileReport>,
    pub summary: Summary,
}
