//! Scanner module: orchestrates a traversal run.
//!
//! The orchestrator seeds one task per input path, starts a fixed pool of
//! workers, and sleeps on the completion tracker until the outstanding-work
//! count drains to zero. Only then does it stop and join the pool and read
//! the accumulated totals, so no worker can be mid-update at snapshot time.
//!
//! ```text
//!  run(paths) ──► seed queue ──► workers ◄──┐
//!                                   │        │ child tasks
//!                                   ├────────┘
//!                                   ▼
//!                      tracker drains to 0 ──► shutdown + join ──► snapshot
//! ```

pub mod accumulator;
pub mod queue;
pub mod tracker;
pub mod worker;

use crate::config::{normalize_worker_count, TraversalConfig};
use crate::error::TraverseError;
use crate::model::{PathTotal, Task, TraversalReport};
use crate::platform::{FileSystem, LocalFs};
use accumulator::SizeAccumulator;
use queue::WorkQueue;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracker::CompletionTracker;
use tracing::{debug, info, warn};
use worker::{aggregate_stats, enqueue_or_resolve, TraversalContext, Worker};

/// How often the orchestrator re-checks a caller's cancel flag.
/// Without a cancel flag it blocks on the tracker with no timeout.
pub const CANCEL_POLL: Duration = Duration::from_millis(50);

/// Compute the recursive byte size of every path with `worker_count`
/// workers (zero or negative means one).
///
/// Returns one total per path, in input order. Unreadable or missing
/// paths total 0; the only error for a valid call is an empty `paths`.
pub fn run<P: AsRef<Path>>(paths: &[P], worker_count: i64) -> Result<Vec<PathTotal>, TraverseError> {
    let report = Traversal::new(paths.iter().map(|p| p.as_ref().to_path_buf()))
        .workers(normalize_worker_count(worker_count))
        .run()?;
    Ok(report.totals)
}

/// Builder for a traversal run with optional filesystem injection and
/// cancellation.
pub struct Traversal {
    paths: Vec<PathBuf>,
    config: TraversalConfig,
    fs: Arc<dyn FileSystem>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Traversal {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            config: TraversalConfig::default(),
            fs: Arc::new(LocalFs),
            cancel: None,
        }
    }

    /// Number of worker threads (0 means 1).
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    pub fn config(mut self, config: TraversalConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `fs` instead of the local filesystem.
    pub fn filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Stop early once `flag` becomes `true`. The report is then marked
    /// incomplete and queued work is discarded.
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Run to completion (or cancellation) on the calling thread.
    pub fn run(self) -> Result<TraversalReport, TraverseError> {
        if self.paths.is_empty() {
            return Err(TraverseError::NoPaths);
        }

        let config = self.config.normalized();
        let start = Instant::now();
        info!(
            paths = self.paths.len(),
            workers = config.workers,
            "Starting traversal"
        );

        let queue = WorkQueue::new();
        let tracker = Arc::new(CompletionTracker::new());
        let sizes = Arc::new(SizeAccumulator::new(self.paths.iter().cloned()));
        let shutdown = Arc::new(AtomicBool::new(false));

        let ctx = TraversalContext {
            queue_rx: queue.receiver(),
            queue_tx: queue.sender(),
            tracker: Arc::clone(&tracker),
            sizes: Arc::clone(&sizes),
            fs: Arc::clone(&self.fs),
            shutdown: Arc::clone(&shutdown),
        };

        // Seed before any worker exists: the count is already > 0 when
        // the first worker can observe it.
        tracker.add(self.paths.len());
        for (owner, path) in self.paths.iter().enumerate() {
            enqueue_or_resolve(&ctx.queue_tx, &tracker, Task::new(path.clone(), owner));
        }

        let mut workers = Vec::with_capacity(config.workers);
        for id in 0..config.workers {
            match Worker::spawn(id, ctx.clone()) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    shutdown.store(true, Ordering::Release);
                    let _ = join_all(&mut workers);
                    return Err(e);
                }
            }
        }
        debug!(count = workers.len(), "Workers spawned");

        let completed = self.wait_for_completion(&tracker);

        shutdown.store(true, Ordering::Release);
        join_all(&mut workers)?;
        let stats = aggregate_stats(&workers);

        let discarded = queue.len();
        if discarded > 0 {
            debug!(discarded, "Queued tasks discarded at shutdown");
        }

        let duration = start.elapsed();
        let report = TraversalReport {
            totals: sizes.snapshot(),
            stats,
            duration,
            completed,
        };

        info!(
            files = stats.files,
            dirs = stats.dirs,
            errors = stats.errors,
            bytes = report.grand_total(),
            duration_ms = duration_millis(duration),
            completed,
            "Traversal finished"
        );

        Ok(report)
    }

    /// Block until all work is resolved. Returns `false` if cancelled first.
    fn wait_for_completion(&self, tracker: &CompletionTracker) -> bool {
        let Some(cancel) = &self.cancel else {
            tracker.wait_until_zero();
            return true;
        };

        loop {
            if tracker.wait_timeout(CANCEL_POLL) {
                return true;
            }
            if cancel.load(Ordering::Relaxed) {
                info!(
                    outstanding = tracker.outstanding(),
                    "Traversal cancelled"
                );
                return false;
            }
        }
    }
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Join every worker, reporting the first failure after all have exited.
fn join_all(workers: &mut [Worker]) -> Result<(), TraverseError> {
    let mut first_err = None;
    for worker in workers.iter_mut() {
        if let Err(e) = worker.join() {
            warn!(error = %e, "Worker failed to join cleanly");
            first_err.get_or_insert(e);
        }
    }
    first_err.map_or(Ok(()), Err)
}
