//! Configuration discovery and effective settings resolution.
//!
//! pmcheck reads `pmcheck.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `base`: the directory holding the config (or the detected repo root)
//! - `output`: `human`
//! - `collections` / `environments`: the files shipped with this repo
//! - `rules.*`: built-in rule sets
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{ConfigError, Result};
use crate::models::{DocumentKind, FileTarget};
use crate::rules::{self, RuleSet};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

pub const CONFIG_NAMES: [&str; 3] = ["pmcheck.toml", "pmcheck.yaml", "pmcheck.yml"];

pub const DEFAULT_COLLECTIONS: &[&str] = &["JSON Placeholder.postman_collection.json"];

pub const DEFAULT_ENVIRONMENTS: &[&str] = &[
    "JSON Placeholder Env.postman_environment.json",
    "Multi-API.postman_environment.json",
    "Performance-Testing.postman_environment.json",
    "Security-Testing.postman_environment.json",
];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `pmcheck.toml|yaml`.
pub struct PmcheckConfig {
    pub output: Option<String>,
    /// Base directory for targets, relative to the config file.
    pub base: Option<String>,
    pub collections: Option<Vec<String>>,
    pub environments: Option<Vec<String>>,
    #[serde(default)]
    pub rules: Option<RulesCfg>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `[rules]` section: policy files replacing the built-in rule sets.
pub struct RulesCfg {
    pub collection: Option<String>,
    pub environment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl FromStr for OutputMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "human" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            other => Err(ConfigError::Output(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration handed to the runner.
pub struct Effective {
    pub base_dir: PathBuf,
    pub config_file: Option<PathBuf>,
    pub output: OutputMode,
    /// Collections first, then environments, each in declared order.
    pub targets: Vec<FileTarget>,
    pub collection_rules: RuleSet,
    pub environment_rules: RuleSet,
}

impl Effective {
    /// Built-in rules, default targets, human output, rooted at `base_dir`.
    pub fn with_defaults(base_dir: impl Into<PathBuf>) -> Self {
        let targets = DEFAULT_COLLECTIONS
            .iter()
            .map(|p| FileTarget::new(*p, DocumentKind::Collection))
            .chain(
                DEFAULT_ENVIRONMENTS
                    .iter()
                    .map(|p| FileTarget::new(*p, DocumentKind::Environment)),
            )
            .collect();
        Self {
            base_dir: base_dir.into(),
            config_file: None,
            output: OutputMode::Human,
            targets,
            collection_rules: rules::builtin(DocumentKind::Collection),
            environment_rules: rules::builtin(DocumentKind::Environment),
        }
    }

    pub fn rules_for(&self, kind: DocumentKind) -> &RuleSet {
        match kind {
            DocumentKind::Collection => &self.collection_rules,
            DocumentKind::Environment => &self.environment_rules,
        }
    }
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `pmcheck.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Find the config file directly under `root`, if any.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_NAMES
        .iter()
        .map(|n| root.join(n))
        .find(|p| p.is_file())
}

/// Load a `PmcheckConfig` from `path`, picking the parser by extension.
pub fn load_config(path: &Path) -> Result<PmcheckConfig> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_root: Option<&str>,
    cli_config: Option<&str>,
    cli_output: Option<&str>,
) -> Result<Effective> {
    let start = start_dir(cli_root);
    let (root, config_file) = match cli_config {
        Some(c) => {
            let p = PathBuf::from(c);
            let dir = p
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (dir, Some(p))
        }
        None => {
            let root = detect_repo_root(&start);
            let cfg = find_config(&root);
            (root, cfg)
        }
    };
    let cfg = match config_file.as_deref() {
        Some(p) => {
            debug!(config = %p.display(), "loading config");
            load_config(p)?
        }
        None => PmcheckConfig::default(),
    };

    let output = cli_output
        .map(str::to_string)
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string())
        .parse::<OutputMode>()?;

    let base_dir = match cfg.base.as_deref() {
        Some(b) => root.join(b),
        None => root.clone(),
    };

    let mut targets = Vec::new();
    for (kind, declared, defaults) in [
        (DocumentKind::Collection, cfg.collections, DEFAULT_COLLECTIONS),
        (DocumentKind::Environment, cfg.environments, DEFAULT_ENVIRONMENTS),
    ] {
        let entries =
            declared.unwrap_or_else(|| defaults.iter().map(|s| s.to_string()).collect());
        for path in expand_targets(&base_dir, &entries)? {
            targets.push(FileTarget::new(path, kind));
        }
    }

    let rules_cfg = cfg.rules.unwrap_or_default();
    let policy_path = |p: Option<String>| p.map(|p| root.join(p));
    let collection_rules = rules::resolve(
        DocumentKind::Collection,
        policy_path(rules_cfg.collection).as_deref(),
    )?;
    let environment_rules = rules::resolve(
        DocumentKind::Environment,
        policy_path(rules_cfg.environment).as_deref(),
    )?;

    Ok(Effective {
        base_dir,
        config_file,
        output,
        targets,
        collection_rules,
        environment_rules,
    })
}

fn is_glob(entry: &str) -> bool {
    entry.contains(|c| matches!(c, '*' | '?' | '['))
}

/// Expand glob entries against `base`.
///
/// Entries naming an existing file are taken literally even when they hold
/// glob characters (`API [v2].json`), and a pattern matching nothing is kept
/// as written, so every declared entry reaches the validator.
pub fn expand_targets(base: &Path, entries: &[String]) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::new();
    let push = |out: &mut Vec<String>, p: String| {
        if !out.contains(&p) {
            out.push(p);
        }
    };
    let escaped_base = PathBuf::from(glob::Pattern::escape(&base.to_string_lossy()));
    for entry in entries {
        if !is_glob(entry) || base.join(entry).exists() {
            push(&mut out, entry.clone());
            continue;
        }
        let pattern = escaped_base.join(entry).to_string_lossy().to_string();
        let paths = glob::glob(&pattern).map_err(|source| ConfigError::Glob {
            pattern: entry.clone(),
            source,
        })?;
        let mut matched: Vec<String> = Vec::new();
        for p in paths {
            let p = p.map_err(|source| ConfigError::GlobWalk {
                pattern: entry.clone(),
                source,
            })?;
            if p.is_file() {
                matched.push(
                    pathdiff::diff_paths(&p, base)
                        .unwrap_or(p)
                        .to_string_lossy()
                        .to_string(),
                );
            }
        }
        if matched.is_empty() {
            debug!(pattern = %entry, "pattern matched no files; keeping it as a path");
            push(&mut out, entry.clone());
            continue;
        }
        matched.sort();
        for m in matched {
            push(&mut out, m);
        }
    }
    Ok(out)
}

/// Absolute start directory for config discovery, so the upward walk can
/// leave a relative start like `.`.
fn start_dir(cli_root: Option<&str>) -> PathBuf {
    let start = PathBuf::from(cli_root.unwrap_or("."));
    fs::canonicalize(&start)
        .or_else(|_| std::env::current_dir().map(|cwd| cwd.join(&start)))
        .unwrap_or(start)
}
