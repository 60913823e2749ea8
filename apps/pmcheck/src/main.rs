//! pmcheck binary entry point.
//! Resolves configuration, runs the requested command, and sets the exit code.

use clap::Parser;
use pmcheck::cli::{Cli, Commands, CommonOpts};
use pmcheck::config::{self, Effective};
use pmcheck::error::ConfigError;
use pmcheck::{output, runner, utils};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Some(Commands::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Rules { opts, kind }) => {
            let eff = resolve_or_exit(&opts);
            output::print_rules(&eff, kind.map(Into::into), eff.output);
        }
        Some(Commands::Check { opts }) => check(&opts),
        None => check(&CommonOpts::default()),
    }
}

fn check(opts: &CommonOpts) {
    let eff = resolve_or_exit(opts);
    let result = runner::run_check(&eff);
    output::print_check(&result, eff.output);
    std::process::exit(result.summary.exit_code());
}

/// Resolve configuration; configuration errors end the process with status 2.
fn resolve_or_exit(opts: &CommonOpts) -> Effective {
    match config::resolve_effective(
        opts.root.as_deref(),
        opts.config.as_deref(),
        opts.output.as_deref(),
    ) {
        Ok(eff) => {
            if eff.config_file.is_none() && eff.output == config::OutputMode::Human {
                eprintln!(
                    "{} No pmcheck.toml found; checking default files in {}",
                    utils::note_prefix(),
                    eff.base_dir.display()
                );
            }
            eff
        }
        Err(e) => fail(e),
    }
}

fn fail(e: ConfigError) -> ! {
    eprintln!("{} {}", utils::error_prefix(), e);
    std::process::exit(2);
}
