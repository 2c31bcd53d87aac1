//! Traversal settings.
//!
//! The worker count is the only knob the engine has. Callers may hand it
//! raw user input; normalisation guarantees a pool of at least one worker
//! and caps runaway requests.

use tracing::warn;

/// Upper bound on the worker pool.
pub const MAX_WORKERS: usize = 512;

/// Settings for one traversal run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalConfig {
    /// Number of worker threads. 0 is treated as 1.
    pub workers: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

impl TraversalConfig {
    pub fn with_workers(workers: usize) -> Self {
        Self { workers }
    }

    /// Return a copy whose worker count lies in `1..=MAX_WORKERS`.
    pub fn normalized(self) -> Self {
        let workers = match self.workers {
            0 => 1,
            n if n > MAX_WORKERS => {
                warn!(
                    requested = n,
                    max = MAX_WORKERS,
                    "Worker count capped"
                );
                MAX_WORKERS
            }
            n => n,
        };
        Self { workers }
    }
}

/// Map a signed, user-supplied worker count to a pool size.
///
/// Zero and negative values mean one worker.
pub fn normalize_worker_count(requested: i64) -> usize {
    if requested < 1 {
        1
    } else {
        usize::try_from(requested).unwrap_or(MAX_WORKERS)
    }
}
