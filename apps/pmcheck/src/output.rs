//! Output rendering for check results and rule listings.
//!
//! Supports `human` (default) and `json`. Human output sends `[OK]` lines
//! to stdout and `[WARN]`/`[ERROR]` lines to stderr; JSON output is a
//! single document on stdout.

use crate::config::{Effective, OutputMode};
use crate::models::{CheckResult, DocumentKind, Severity, ValidationResult};
use crate::rules::RuleSet;
use crate::utils::{colors_enabled, Stream, Tag};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One rendered line; `tag` is painted in front of `text` when present.
pub struct Line {
    pub stream: Stream,
    pub tag: Option<Tag>,
    pub text: String,
}

impl Line {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            stream: Stream::Stdout,
            tag: None,
            text: text.into(),
        }
    }

    fn tagged(tag: Tag, text: String) -> Self {
        let stream = match tag {
            Tag::Ok => Stream::Stdout,
            Tag::Warn | Tag::Error => Stream::Stderr,
        };
        Self {
            stream,
            tag: Some(tag),
            text,
        }
    }

    pub fn render(&self, color: bool) -> String {
        match self.tag {
            Some(tag) => format!("{} {}", tag.paint(color), self.text),
            None => self.text.clone(),
        }
    }
}

/// Print check results in the requested format.
pub fn print_check(res: &CheckResult, output: OutputMode) {
    match output {
        OutputMode::Json => match serde_json::to_string_pretty(&compose_check_json(res)) {
            Ok(s) => println!("{}", s),
            Err(e) => tracing::error!(error = %e, "failed to serialize results"),
        },
        OutputMode::Human => {
            let out_color = colors_enabled(Stream::Stdout);
            let err_color = colors_enabled(Stream::Stderr);
            for line in compose_human(res) {
                match line.stream {
                    Stream::Stdout => println!("{}", line.render(out_color)),
                    Stream::Stderr => eprintln!("{}", line.render(err_color)),
                }
            }
        }
    }
}

/// Compose human lines (pure) for testing.
pub fn compose_human(res: &CheckResult) -> Vec<Line> {
    let mut lines = vec![
        Line::plain("Validating Postman Collections and Environments..."),
        Line::plain(""),
    ];
    for (i, kind) in DocumentKind::ALL.iter().enumerate() {
        if i > 0 {
            lines.push(Line::plain(""));
        }
        lines.push(Line::plain(kind.heading()));
        for f in res.files.iter().filter(|f| f.target.kind == *kind) {
            let subject = format!("{} {}", kind.label(), f.target.path);
            match &f.result {
                ValidationResult::NotFound => {
                    lines.push(Line::tagged(Tag::Warn, format!("{}: File not found", subject)))
                }
                ValidationResult::ParseError(msg) => lines.push(Line::tagged(
                    Tag::Error,
                    format!("{}: Invalid JSON - {}", subject, msg),
                )),
                ValidationResult::Validated(violations) => {
                    for v in violations {
                        let tag = match v.severity {
                            Severity::Warning => Tag::Warn,
                            Severity::Error => Tag::Error,
                        };
                        lines.push(Line::tagged(tag, format!("{}: {}", subject, v.message)));
                    }
                    if !violations.iter().any(|v| v.severity == Severity::Error) {
                        lines.push(Line::tagged(Tag::Ok, format!("{}: Valid", subject)));
                    }
                }
            }
        }
    }
    lines.push(Line::plain(""));
    lines.push(Line::plain("Validation Summary:"));
    lines.push(Line::plain(format!("   Passed: {}", res.summary.successes)));
    lines.push(Line::plain(format!("   Warnings: {}", res.summary.warnings)));
    lines.push(Line::plain(format!("   Errors: {}", res.summary.errors)));
    lines
}

/// Compose check JSON object (pure) for testing/snapshot purposes.
pub fn compose_check_json(res: &CheckResult) -> JsonVal {
    let items: Vec<_> = res
        .files
        .iter()
        .map(|f| {
            let message = match &f.result {
                ValidationResult::NotFound => Some("File not found".to_string()),
                ValidationResult::ParseError(msg) => Some(msg.clone()),
                ValidationResult::Validated(_) => None,
            };
            json!({
                "file": f.target.path,
                "kind": f.target.kind,
                "status": f.result.status(),
                "message": message,
                "violations": f.result.violations(),
            })
        })
        .collect();
    json!({"results": items, "summary": res.summary})
}

/// Print the effective rule sets, optionally restricted to one kind.
pub fn print_rules(eff: &Effective, only: Option<DocumentKind>, output: OutputMode) {
    let sets: Vec<&RuleSet> = DocumentKind::ALL
        .iter()
        .filter(|k| only.map_or(true, |o| o == **k))
        .map(|k| eff.rules_for(*k))
        .collect();
    match output {
        OutputMode::Json => {
            let out: Vec<_> = sets
                .iter()
                .map(|s| {
                    let checks: Vec<_> = s.rules().iter().map(|r| r.check()).collect();
                    json!({"kind": s.kind(), "checks": checks})
                })
                .collect();
            match serde_json::to_string_pretty(&out) {
                Ok(s) => println!("{}", s),
                Err(e) => tracing::error!(error = %e, "failed to serialize rules"),
            }
        }
        OutputMode::Human => {
            let color = colors_enabled(Stream::Stdout);
            for s in sets {
                let head = format!("{} rules:", s.kind().label());
                if color {
                    println!("{}", head.bold());
                } else {
                    println!("{}", head);
                }
                for r in s.rules() {
                    let c = r.check();
                    println!("  {} ({}) {}", c.id(), c.severity(), c.describe());
                }
            }
        }
    }
}
