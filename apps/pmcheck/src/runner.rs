//! Runs the validator over every configured target.
//!
//! Files are validated in parallel, but results are collected in declared
//! order (collections first) and tallied sequentially, so output is stable.

use crate::config::Effective;
use crate::models::{CheckResult, FileReport};
use crate::report::Report;
use crate::validate::validate;
use rayon::prelude::*;
use tracing::info;

/// Validate all targets in `eff` and tally the results.
pub fn run_check(eff: &Effective) -> CheckResult {
    info!(
        base = %eff.base_dir.display(),
        targets = eff.targets.len(),
        "validating"
    );
    let files: Vec<FileReport> = eff
        .targets
        .par_iter()
        .map(|target| FileReport {
            target: target.clone(),
            result: validate(target, &eff.base_dir, eff.rules_for(target.kind)),
        })
        .collect();

    let mut report = Report::new();
    for f in &files {
        report.record(&f.result);
    }
    CheckResult {
        files,
        summary: report.summary(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocumentKind, FileTarget, ValidationResult};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_good_collection_exits_zero() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("c.json"),
            r#"{"info": {"author": "SomeoneElse"}, "item": []}"#,
        )
        .unwrap();
        let mut eff = Effective::with_defaults(dir.path());
        eff.targets = vec![FileTarget::new("c.json", DocumentKind::Collection)];
        let res = run_check(&eff);
        assert_eq!(res.summary.successes, 1);
        assert_eq!(res.summary.warnings, 0);
        assert_eq!(res.summary.errors, 0);
        assert_eq!(res.summary.exit_code(), 0);
    }

    #[test]
    fn test_broken_environment_exits_one() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("e.json"), "{not valid json").unwrap();
        let mut eff = Effective::with_defaults(dir.path());
        eff.targets = vec![FileTarget::new("e.json", DocumentKind::Environment)];
        let res = run_check(&eff);
        assert_eq!(res.summary.errors, 1);
        assert_eq!(res.summary.exit_code(), 1);
    }

    #[test]
    fn test_results_keep_declared_order_and_scan_everything() {
        let dir = tempdir().unwrap();
        let base = dir.path();
        fs::write(base.join("bad.json"), "[").unwrap();
        fs::write(base.join("env.json"), r#"{"values": []}"#).unwrap();
        let mut eff = Effective::with_defaults(base);
        eff.targets = vec![
            FileTarget::new("bad.json", DocumentKind::Collection),
            FileTarget::new("gone.json", DocumentKind::Collection),
            FileTarget::new("env.json", DocumentKind::Environment),
        ];
        let res = run_check(&eff);
        let order: Vec<_> = res.files.iter().map(|f| f.target.path.as_str()).collect();
        assert_eq!(order, vec!["bad.json", "gone.json", "env.json"]);
        assert!(matches!(res.files[0].result, ValidationResult::ParseError(_)));
        assert_eq!(res.files[1].result, ValidationResult::NotFound);
        assert_eq!(res.files[2].result, ValidationResult::Validated(vec![]));
        assert_eq!(res.summary.successes, 1);
        assert_eq!(res.summary.warnings, 1);
        assert_eq!(res.summary.errors, 1);
    }

    #[test]
    fn test_missing_files_only_warn() {
        let dir = tempdir().unwrap();
        let res = run_check(&Effective::with_defaults(dir.path()));
        assert_eq!(res.summary.warnings, 5);
        assert_eq!(res.summary.exit_code(), 0);
    }
}
