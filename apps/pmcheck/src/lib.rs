//! pmcheck core library.
//!
//! Validates Postman collection and environment files: each file must
//! parse as JSON and pass the rule set for its kind.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `rules`: Built-in and policy-defined rule sets.
//! - `checks`: Evaluation of rules against parsed documents.
//! - `validate`: Single-file validation.
//! - `report`: Success/warning/error tally and exit code.
//! - `runner`: Validation of every configured target.
//! - `models`: Targets, results, and policy schema.
//! - `output`: Human/JSON printers.
//! - `utils`: Terminal helpers.
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod report;
pub mod rules;
pub mod runner;
pub mod utils;
pub mod validate;
