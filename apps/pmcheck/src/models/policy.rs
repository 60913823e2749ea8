//! Policy schema for rule sets.
//!
//! A policy is an ordered list of `[[checks]]` tables. Each check names a
//! dotted field path (`info.author`, `item.0.name`), an optional `message`,
//! and an optional `level` (warning|warn|error, default warning).

use super::Severity;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::fmt;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
/// Root policy loaded from a TOML file referenced by configuration.
pub struct Policy {
    #[serde(default)]
    pub checks: Vec<Check>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
/// JSON value kinds accepted by the `type` check.
pub enum JsonKind {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl JsonKind {
    pub fn matches(&self, value: &Json) -> bool {
        match self {
            JsonKind::Object => value.is_object(),
            JsonKind::Array => value.is_array(),
            JsonKind::String => value.is_string(),
            JsonKind::Number => value.is_number(),
            JsonKind::Integer => value.is_i64() || value.is_u64(),
            JsonKind::Boolean => value.is_boolean(),
            JsonKind::Null => value.is_null(),
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JsonKind::Object => "object",
            JsonKind::Array => "array",
            JsonKind::String => "string",
            JsonKind::Number => "number",
            JsonKind::Integer => "integer",
            JsonKind::Boolean => "boolean",
            JsonKind::Null => "null",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind")]
/// Checks supported by the engine.
pub enum Check {
    /// Field must exist with the given JSON kind. Empty containers are fine.
    #[serde(rename = "type")]
    Type {
        field: String,
        expect: JsonKind,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        level: Option<Severity>,
    },
    /// Field must be set (not missing, null, or "") and not one of `deny`.
    /// Both conditions report through the same violation.
    #[serde(rename = "present")]
    Present {
        field: String,
        #[serde(default)]
        deny: Vec<Json>,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        level: Option<Severity>,
    },
    #[serde(rename = "required")]
    Required {
        fields: Vec<String>,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        level: Option<Severity>,
    },
    #[serde(rename = "const")]
    Const {
        field: String,
        value: Json,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        level: Option<Severity>,
    },
    #[serde(rename = "enum")]
    Enum {
        field: String,
        values: Vec<Json>,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        level: Option<Severity>,
    },
    #[serde(rename = "pattern")]
    Pattern {
        field: String,
        regex: String,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        level: Option<Severity>,
    },
}

impl Check {
    /// Rule identifier reported with violations, e.g. `type:item`.
    pub fn id(&self) -> String {
        match self {
            Check::Type { field, .. } => format!("type:{}", field),
            Check::Present { field, .. } => format!("present:{}", field),
            Check::Required { fields, .. } => format!("required:{}", fields.join(",")),
            Check::Const { field, .. } => format!("const:{}", field),
            Check::Enum { field, .. } => format!("enum:{}", field),
            Check::Pattern { field, .. } => format!("pattern:{}", field),
        }
    }

    pub fn severity(&self) -> Severity {
        let level = match self {
            Check::Type { level, .. }
            | Check::Present { level, .. }
            | Check::Required { level, .. }
            | Check::Const { level, .. }
            | Check::Enum { level, .. }
            | Check::Pattern { level, .. } => level,
        };
        (*level).unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Check::Type { message, .. }
            | Check::Present { message, .. }
            | Check::Required { message, .. }
            | Check::Const { message, .. }
            | Check::Enum { message, .. }
            | Check::Pattern { message, .. } => message.as_deref(),
        }
    }

    /// One-line description for `pmcheck rules`.
    pub fn describe(&self) -> String {
        match self {
            Check::Type { field, expect, .. } => format!("{} must be {}", field, expect),
            Check::Present { field, deny, .. } if deny.is_empty() => {
                format!("{} must be set", field)
            }
            Check::Present { field, deny, .. } => format!(
                "{} must be set and not one of [{}]",
                field,
                join_values(deny)
            ),
            Check::Required { fields, .. } => format!("{} required", fields.join(", ")),
            Check::Const { field, value, .. } => format!("{} must equal {}", field, value),
            Check::Enum { field, values, .. } => {
                format!("{} must be one of [{}]", field, join_values(values))
            }
            Check::Pattern { field, regex, .. } => format!("{} must match /{}/", field, regex),
        }
    }
}

fn join_values(values: &[Json]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parses_tagged_checks_in_order() {
        let src = r#"
[[checks]]
kind = "type"
field = "item"
expect = "array"

[[checks]]
kind = "present"
field = "info.author"
deny = ["legacy"]
level = "warn"
message = "stale author"

[[checks]]
kind = "pattern"
field = "info.schema"
regex = "^https://"
level = "error"
"#;
        let policy: Policy = toml::from_str(src).unwrap();
        assert_eq!(policy.checks.len(), 3);
        assert_eq!(policy.checks[0].id(), "type:item");
        assert_eq!(policy.checks[1].severity(), Severity::Warning);
        assert_eq!(policy.checks[1].message(), Some("stale author"));
        assert_eq!(policy.checks[2].severity(), Severity::Error);
    }

    #[test]
    fn test_json_kind_integer_rejects_floats() {
        assert!(JsonKind::Integer.matches(&serde_json::json!(3)));
        assert!(!JsonKind::Integer.matches(&serde_json::json!(3.5)));
        assert!(JsonKind::Number.matches(&serde_json::json!(3.5)));
    }
}
