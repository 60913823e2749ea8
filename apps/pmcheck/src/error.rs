use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a run before any file is checked.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid TOML: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{path} is not valid YAML: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid regex for rule '{rule}': {source}")]
    Regex {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid target pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("cannot expand target pattern '{pattern}': {source}")]
    GlobWalk {
        pattern: String,
        #[source]
        source: glob::GlobError,
    },

    #[error("unknown output mode '{0}' (expected human|json)")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
