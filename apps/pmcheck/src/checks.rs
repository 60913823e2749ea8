//! Evaluation of policy checks against a parsed document.
//!
//! Every rule in a set is evaluated; a document reports all of its
//! violations in rule order, never just the first.

use crate::models::policy::Check;
use crate::models::Violation;
use crate::rules::{Rule, RuleSet};
use serde_json::Value as Json;

/// Resolve a dotted path (`info.author`, `item.0.name`) inside `json`.
///
/// `$` and the empty string address the document root. Numeric segments
/// index into arrays.
pub fn lookup<'a>(json: &'a Json, path: &str) -> Option<&'a Json> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(json);
    }
    path.split('.').try_fold(json, |cur, seg| match cur {
        Json::Object(map) => map.get(seg),
        Json::Array(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// A field counts as unset when missing or falsy: null, `false`, `0`, or "".
fn is_unset(value: Option<&Json>) -> bool {
    match value {
        None | Some(Json::Null) | Some(Json::Bool(false)) => true,
        Some(Json::String(s)) => s.is_empty(),
        Some(Json::Number(n)) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Run every rule of `rules` against `json`, collecting violations in order.
pub fn run_checks(rules: &RuleSet, json: &Json) -> Vec<Violation> {
    rules
        .rules()
        .iter()
        .flat_map(|rule| check_rule(rule, json))
        .collect()
}

fn check_rule(rule: &Rule, json: &Json) -> Vec<Violation> {
    let check = rule.check();
    let violation = |field: &str, default_msg: String| Violation {
        rule: check.id(),
        severity: check.severity(),
        path: format!("$.{}", field),
        message: check.message().map(str::to_string).unwrap_or(default_msg),
    };
    match check {
        Check::Type { field, expect, .. } => match lookup(json, field) {
            Some(v) if expect.matches(v) => vec![],
            _ => vec![violation(
                field,
                format!("Missing or invalid '{}' {}", field, expect),
            )],
        },
        Check::Present { field, deny, .. } => {
            let v = lookup(json, field);
            let stale = v.map(|v| deny.contains(v)).unwrap_or(false);
            if is_unset(v) || stale {
                vec![violation(
                    field,
                    format!("'{}' is missing or still has a legacy value", field),
                )]
            } else {
                vec![]
            }
        }
        Check::Required { fields, .. } => fields
            .iter()
            .filter(|f| matches!(lookup(json, f), None | Some(Json::Null)))
            .map(|f| violation(f, format!("Missing required field '{}'", f)))
            .collect(),
        Check::Const { field, value, .. } => match lookup(json, field) {
            Some(v) if v != value => vec![violation(
                field,
                format!("'{}' must equal {}", field, value),
            )],
            _ => vec![],
        },
        Check::Enum { field, values, .. } => match lookup(json, field) {
            Some(v) if !values.contains(v) => vec![violation(
                field,
                format!("'{}' has an unexpected value {}", field, v),
            )],
            _ => vec![],
        },
        Check::Pattern { field, regex, .. } => match lookup(json, field) {
            Some(v) => {
                let ok = match (v.as_str(), rule.pattern()) {
                    (Some(s), Some(re)) => re.is_match(s),
                    _ => false,
                };
                if ok {
                    vec![]
                } else {
                    vec![violation(
                        field,
                        format!("'{}' does not match /{}/", field, regex),
                    )]
                }
            }
            None => vec![],
        },
    }
}
