//! Results of a traversal run.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Final byte total for one top-level argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTotal {
    /// The argument exactly as the caller supplied it.
    pub path: PathBuf,
    /// Sum of the byte lengths of every regular file beneath `path`.
    pub total_bytes: u64,
}

/// Counters aggregated from every worker after the pool is joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalStats {
    /// Regular files whose length was added to a total.
    pub files: u64,
    /// Directories expanded into child tasks.
    pub dirs: u64,
    /// Symlinks, sockets, devices and other entries that contribute nothing.
    pub other: u64,
    /// Non-fatal per-task errors (failed stat, unreadable directory, ...).
    pub errors: u64,
}

impl TraversalStats {
    /// Fold another worker's counters into this one.
    pub fn merge(&mut self, other: &TraversalStats) {
        self.files += other.files;
        self.dirs += other.dirs;
        self.other += other.other;
        self.errors += other.errors;
    }
}

/// Everything a finished (or cancelled) run reports.
#[derive(Debug, Clone)]
pub struct TraversalReport {
    /// One entry per input path, in input order.
    pub totals: Vec<PathTotal>,
    pub stats: TraversalStats,
    pub duration: Duration,
    /// `false` when the run was cancelled before all work drained; totals
    /// are then partial.
    pub completed: bool,
}

impl TraversalReport {
    /// Sum of all per-path totals.
    pub fn grand_total(&self) -> u64 {
        self.totals.iter().map(|t| t.total_bytes).sum()
    }
}
