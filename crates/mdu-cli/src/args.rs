//! Command-line arguments.

use crate::output::RenderOptions;
use clap::{Parser, ValueEnum};
use mdu_core::{normalize_worker_count, TraversalConfig};
use std::path::PathBuf;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `<path>\t<size>` per line
    Text,
    /// A JSON array with one `{path, total_bytes}` object per path
    Json,
    /// CSV with a `path,total_bytes` header
    Csv,
}

/// Multi-threaded disk usage: total byte size of each path's file tree.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "mdu",
    version,
    about = "Multi-threaded disk usage: total byte size of each path's file tree",
    after_help = "EXAMPLES:\n    \
        mdu /var/log\n    \
        mdu -j 8 ~/src ~/Downloads\n    \
        mdu -j 4 -H -c /srv/a /srv/b\n    \
        mdu --format json /data"
)]
pub struct CliArgs {
    /// Files or directories to measure
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Number of worker threads (values below 1 mean 1)
    #[arg(
        short = 'j',
        long = "jobs",
        env = "MDU_JOBS",
        default_value_t = 1,
        value_name = "N",
        allow_negative_numbers = true
    )]
    pub jobs: i64,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print sizes as 1.5K, 23M, 4.0G (text output only)
    #[arg(short = 'H', long)]
    pub human_readable: bool,

    /// Also print a grand total over all paths
    #[arg(short = 'c', long)]
    pub total: bool,

    /// Debug logging on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl CliArgs {
    pub fn traversal_config(&self) -> TraversalConfig {
        TraversalConfig::with_workers(normalize_worker_count(self.jobs))
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            format: self.format,
            human_readable: self.human_readable,
            grand_total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn jobs_flag_and_positional_paths() {
        let args = CliArgs::try_parse_from(["mdu", "-j", "4", "/a", "/b"]).unwrap();
        assert_eq!(args.jobs, 4);
        assert_eq!(args.paths, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(args.traversal_config().workers, 4);
    }

    #[test]
    fn negative_jobs_are_accepted_and_normalised() {
        let args = CliArgs::try_parse_from(["mdu", "-j", "-3", "/a"]).unwrap();
        assert_eq!(args.jobs, -3);
        assert_eq!(args.traversal_config().workers, 1);
    }

    #[test]
    fn zero_jobs_means_one_worker() {
        let args = CliArgs::try_parse_from(["mdu", "-j", "0", "/a"]).unwrap();
        assert_eq!(args.traversal_config().workers, 1);
    }

    #[test]
    fn paths_are_required() {
        assert!(CliArgs::try_parse_from(["mdu", "-j", "2"]).is_err());
    }

    #[test]
    fn format_and_flags() {
        let args =
            CliArgs::try_parse_from(["mdu", "--format", "csv", "-H", "-c", "/a"]).unwrap();
        let opts = args.render_options();
        assert_eq!(opts.format, OutputFormat::Csv);
        assert!(opts.human_readable);
        assert!(opts.grand_total);
    }
}
