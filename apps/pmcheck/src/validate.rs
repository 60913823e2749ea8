//! Single-file validation: existence, JSON syntax, then rule checks.

use crate::checks::run_checks;
use crate::models::{FileTarget, ValidationResult};
use crate::rules::RuleSet;
use serde_json::Value as Json;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Validate `target` relative to `base_dir` with `rules`.
///
/// Never fails: a missing file is `NotFound`, an unreadable or malformed
/// file is `ParseError`, and anything that parses is `Validated` with every
/// violation the rule set reports.
pub fn validate(target: &FileTarget, base_dir: &Path, rules: &RuleSet) -> ValidationResult {
    let path = base_dir.join(&target.path);
    if !path.exists() {
        debug!(file = %path.display(), "not found");
        return ValidationResult::NotFound;
    }
    let data = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => return ValidationResult::ParseError(e.to_string()),
    };
    let json: Json = match serde_json::from_str(&data) {
        Ok(v) => v,
        Err(e) => {
            debug!(file = %path.display(), error = %e, "invalid json");
            return ValidationResult::ParseError(e.to_string());
        }
    };
    let violations = run_checks(rules, &json);
    debug!(file = %path.display(), violations = violations.len(), "checked");
    ValidationResult::Validated(violations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentKind;
    use crate::rules::builtin;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let t = FileTarget::new("missing.json", DocumentKind::Collection);
        assert_eq!(
            validate(&t, dir.path(), &builtin(t.kind)),
            ValidationResult::NotFound
        );
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("env.json"), "{not valid json").unwrap();
        let t = FileTarget::new("env.json", DocumentKind::Environment);
        match validate(&t, dir.path(), &builtin(t.kind)) {
            ValidationResult::ParseError(msg) => assert!(!msg.is_empty()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_json_never_parse_error() {
        let dir = tempdir().unwrap();
        for (i, body) in ["null", "[]", "42", "\"s\"", "{}", "{\"values\": 1}"]
            .iter()
            .enumerate()
        {
            let name = format!("f{}.json", i);
            fs::write(dir.path().join(&name), body).unwrap();
            let t = FileTarget::new(name, DocumentKind::Environment);
            let res = validate(&t, dir.path(), &builtin(t.kind));
            assert!(matches!(res, ValidationResult::Validated(_)), "{}", body);
        }
    }

    #[test]
    fn test_clean_collection_validates_without_violations() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("c")).unwrap();
        fs::write(
            dir.path().join("c/api.postman_collection.json"),
            r#"{"info": {"name": "api", "author": "SomeoneElse"}, "item": []}"#,
        )
        .unwrap();
        let t = FileTarget::new("c/api.postman_collection.json", DocumentKind::Collection);
        assert_eq!(
            validate(&t, dir.path(), &builtin(t.kind)),
            ValidationResult::Validated(vec![])
        );
    }
}
