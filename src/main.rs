//! mdu: multi-threaded disk usage.
//!
//! Thin binary entry point. All logic lives in the `mdu-core`
//! and `mdu-cli` crates.

use clap::Parser;
use mdu_cli::CliArgs;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive; overrides `-v`.
const LOG_ENV: &str = "MDU_LOG";

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match mdu_cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("mdu: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Structured logging on stderr; stdout is reserved for results.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("mdu=debug,mdu_core=debug,mdu_cli=debug,warn")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
