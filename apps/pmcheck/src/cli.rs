//! CLI argument parsing via `clap`.

use crate::models::DocumentKind;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "pmcheck",
    version,
    about = "Validate Postman collections and environments",
    long_about = "pmcheck — checks Postman collection and environment files for JSON syntax and expected structure.\n\nRunning without a subcommand is the same as `pmcheck check`.\nConfiguration precedence: CLI > pmcheck.toml > defaults.",
    after_help = "Examples:\n  pmcheck\n  pmcheck check --root postman --output json\n  pmcheck rules --kind collection"
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Args, Default, Clone)]
/// Options shared by commands that resolve configuration.
pub struct CommonOpts {
    #[arg(long, help = "Start directory for config discovery (default: current dir)")]
    pub root: Option<String>,
    #[arg(long, help = "Explicit config file; its directory becomes the root")]
    pub config: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current pmcheck version.")]
    Version,
    /// Validate configured files
    #[command(
        about = "Validate collections and environments",
        long_about = "Parse every configured file and apply the rule set for its kind. Exits 1 when any file fails to parse or an error-level rule fires.",
        after_help = "Examples:\n  pmcheck check\n  pmcheck check --config ci/pmcheck.toml --output json"
    )]
    Check {
        #[command(flatten)]
        opts: CommonOpts,
    },
    /// Show effective rule sets
    #[command(
        about = "List effective rules",
        long_about = "Print the rule set applied to each document kind after config overrides."
    )]
    Rules {
        #[command(flatten)]
        opts: CommonOpts,
        #[arg(long, value_enum, help = "Only show rules for this kind")]
        kind: Option<KindArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Collection,
    Environment,
}

impl From<KindArg> for DocumentKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Collection => DocumentKind::Collection,
            KindArg::Environment => DocumentKind::Environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["pmcheck"]).unwrap();
        assert!(cli.cmd.is_none());
    }

    #[test]
    fn test_check_flags_parse() {
        let cli =
            Cli::try_parse_from(["pmcheck", "check", "--root", "x", "--output", "json"]).unwrap();
        match cli.cmd {
            Some(Commands::Check { opts }) => {
                assert_eq!(opts.root.as_deref(), Some("x"));
                assert_eq!(opts.output.as_deref(), Some("json"));
                assert!(opts.config.is_none());
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn test_rules_kind_parses() {
        let cli = Cli::try_parse_from(["pmcheck", "rules", "--kind", "environment"]).unwrap();
        match cli.cmd {
            Some(Commands::Rules { kind: Some(k), .. }) => {
                assert_eq!(DocumentKind::from(k), DocumentKind::Environment)
            }
            _ => panic!("expected rules"),
        }
    }
}
