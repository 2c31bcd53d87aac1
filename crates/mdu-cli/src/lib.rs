//! mdu CLI: argument parsing and result presentation.
//!
//! The traversal itself lives in `mdu-core`; this crate turns command-line
//! flags into a `Traversal` and its report into text, JSON or CSV.

pub mod args;
pub mod output;

pub use args::{CliArgs, OutputFormat};

use anyhow::{Context, Result};
use mdu_core::Traversal;
use std::io::{self, BufWriter, Write};
use tracing::{info, warn};

/// Run one invocation: measure every path and print the results to stdout.
pub fn run(args: &CliArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run_to(args, &mut out)?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}

/// Same as [`run`], writing to `out` instead of stdout.
pub fn run_to<W: Write>(args: &CliArgs, out: &mut W) -> Result<()> {
    let config = args.traversal_config();
    info!(workers = config.workers, paths = args.paths.len(), "mdu starting");

    let report = Traversal::new(args.paths.iter().cloned())
        .config(config)
        .run()
        .context("Traversal failed")?;

    if report.stats.errors > 0 {
        warn!(
            errors = report.stats.errors,
            "Some entries could not be read and were counted as 0 bytes"
        );
    }

    output::render(&report.totals, &args.render_options(), out)
        .context("Failed to write results")?;
    Ok(())
}
