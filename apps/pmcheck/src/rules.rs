//! Rule sets per document kind.
//!
//! Built-in sets mirror what Postman exports must look like. A policy file
//! configured under `[rules]` replaces the built-in set for its kind.

use crate::error::{ConfigError, Result};
use crate::models::policy::{Check, JsonKind, Policy};
use crate::models::DocumentKind;
use regex::Regex;
use serde_json::Value as Json;
use std::fs;
use std::path::Path;

/// Author placeholder left over from the upstream collection this repo forked.
/// Kept as rule data so the check can be dropped once all files are migrated.
pub const LEGACY_AUTHOR: &str = "mathare";

#[derive(Debug, Clone)]
/// A check with its regex compiled up front.
pub struct Rule {
    check: Check,
    pattern: Option<Regex>,
}

impl Rule {
    pub fn new(check: Check) -> Result<Self> {
        let pattern = match &check {
            Check::Pattern { regex, .. } => {
                Some(Regex::new(regex).map_err(|source| ConfigError::Regex {
                    rule: check.id(),
                    source,
                })?)
            }
            _ => None,
        };
        Ok(Self { check, pattern })
    }

    pub fn check(&self) -> &Check {
        &self.check
    }

    pub fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }
}

#[derive(Debug, Clone)]
/// Ordered rules for one document kind.
pub struct RuleSet {
    kind: DocumentKind,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn from_policy(kind: DocumentKind, policy: Policy) -> Result<Self> {
        let rules = policy
            .checks
            .into_iter()
            .map(Rule::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { kind, rules })
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Built-in rule set for `kind`.
pub fn builtin(kind: DocumentKind) -> RuleSet {
    let checks = match kind {
        DocumentKind::Collection => vec![
            Check::Type {
                field: "info".into(),
                expect: JsonKind::Object,
                message: Some("Missing 'info' field".into()),
                level: None,
            },
            Check::Type {
                field: "item".into(),
                expect: JsonKind::Array,
                message: Some("Missing or invalid 'item' array".into()),
                level: None,
            },
            Check::Present {
                field: "info.author".into(),
                deny: vec![Json::String(LEGACY_AUTHOR.into())],
                message: Some("Author not updated to Rudra".into()),
                level: None,
            },
        ],
        DocumentKind::Environment => vec![Check::Type {
            field: "values".into(),
            expect: JsonKind::Array,
            message: Some("Missing or invalid 'values' array".into()),
            level: None,
        }],
    };
    RuleSet {
        kind,
        rules: checks
            .into_iter()
            .map(|check| Rule {
                check,
                pattern: None,
            })
            .collect(),
    }
}

/// Load a TOML policy file.
pub fn load_policy(path: &Path) -> Result<Policy> {
    let src = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&src).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Rule set for `kind`: the policy at `policy_path` when given, else the built-in.
pub fn resolve(kind: DocumentKind, policy_path: Option<&Path>) -> Result<RuleSet> {
    match policy_path {
        Some(p) => {
            tracing::debug!(%kind, policy = %p.display(), "loading policy");
            RuleSet::from_policy(kind, load_policy(p)?)
        }
        None => Ok(builtin(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_sets_keep_declared_order() {
        let ids: Vec<_> = builtin(DocumentKind::Collection)
            .rules()
            .iter()
            .map(|r| r.check().id())
            .collect();
        assert_eq!(ids, vec!["type:info", "type:item", "present:info.author"]);
        assert_eq!(builtin(DocumentKind::Environment).rules().len(), 1);
    }

    #[test]
    fn test_resolve_policy_replaces_builtin() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("env.toml");
        fs::write(
            &p,
            "[[checks]]\nkind = \"required\"\nfields = [\"name\"]\n",
        )
        .unwrap();
        let set = resolve(DocumentKind::Environment, Some(p.as_path())).unwrap();
        assert_eq!(set.kind(), DocumentKind::Environment);
        assert_eq!(set.rules().len(), 1);
        assert_eq!(set.rules()[0].check().id(), "required:name");
    }

    #[test]
    fn test_invalid_regex_rejected_at_load() {
        let policy: Policy =
            toml::from_str("[[checks]]\nkind = \"pattern\"\nfield = \"id\"\nregex = \"(\"\n")
                .unwrap();
        let err = RuleSet::from_policy(DocumentKind::Collection, policy).unwrap_err();
        assert!(matches!(err, ConfigError::Regex { .. }));
    }

    #[test]
    fn test_missing_policy_file_is_read_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = resolve(DocumentKind::Collection, Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
