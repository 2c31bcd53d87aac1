//! Worker threads.
//!
//! Each worker:
//! - Pulls one task at a time from the shared work queue
//! - Classifies its path through the filesystem collaborator
//! - Files: credits the byte length to the task's owner
//! - Directories: registers, then enqueues, one child task per entry
//! - Resolves the task with the completion tracker
//!
//! A worker never decides on its own that the run is over. An empty queue
//! only sends it back to waiting; it exits when the orchestrator raises
//! the shutdown flag.

use crate::error::TraverseError;
use crate::model::{Task, TraversalStats};
use crate::platform::{EntryKind, FileSystem};
use crate::scanner::accumulator::SizeAccumulator;
use crate::scanner::queue::{WorkQueueReceiver, WorkQueueSender};
use crate::scanner::tracker::{CompletionTracker, TaskGuard};
use std::ffi::OsStr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// How long an idle worker waits for a task before re-checking shutdown.
pub const IDLE_POLL: Duration = Duration::from_millis(50);

/// Shared handles threaded through the orchestrator and every worker.
///
/// These are the run's only shared mutable state; each is mutated only
/// through its own synchronised operations.
#[derive(Clone)]
pub struct TraversalContext {
    pub queue_rx: WorkQueueReceiver,
    pub queue_tx: WorkQueueSender,
    pub tracker: Arc<CompletionTracker>,
    pub sizes: Arc<SizeAccumulator>,
    pub fs: Arc<dyn FileSystem>,
    pub shutdown: Arc<AtomicBool>,
}

/// Counters collected by a single worker.
#[derive(Debug, Default)]
pub struct WorkerStats {
    pub files: AtomicU64,
    pub dirs: AtomicU64,
    pub other: AtomicU64,
    pub errors: AtomicU64,
}

impl WorkerStats {
    fn record_file(&self) {
        self.files.fetch_add(1, Ordering::Relaxed);
    }

    fn record_dir(&self) {
        self.dirs.fetch_add(1, Ordering::Relaxed);
    }

    fn record_other(&self) {
        self.other.fetch_add(1, Ordering::Relaxed);
    }

    fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TraversalStats {
        TraversalStats {
            files: self.files.load(Ordering::Relaxed),
            dirs: self.dirs.load(Ordering::Relaxed),
            other: self.other.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// A worker thread draining the shared queue.
pub struct Worker {
    id: usize,
    handle: Option<JoinHandle<()>>,
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Spawn a worker thread named `mdu-worker-{id}`.
    pub fn spawn(id: usize, ctx: TraversalContext) -> Result<Self, TraverseError> {
        let stats = Arc::new(WorkerStats::default());
        let stats_clone = Arc::clone(&stats);

        let handle = thread::Builder::new()
            .name(format!("mdu-worker-{id}"))
            .spawn(move || worker_loop(id, ctx, stats_clone))
            .map_err(|source| TraverseError::WorkerSpawn { id, source })?;

        Ok(Self {
            id,
            handle: Some(handle),
            stats,
        })
    }

    pub fn stats(&self) -> &WorkerStats {
        &self.stats
    }

    /// Wait for the thread to exit. Counters stay readable afterwards.
    pub fn join(&mut self) -> Result<(), TraverseError> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| TraverseError::WorkerPanicked { id: self.id }),
            None => Ok(()),
        }
    }
}

/// Sum the counters of every worker in the pool.
pub fn aggregate_stats(workers: &[Worker]) -> TraversalStats {
    let mut total = TraversalStats::default();
    for worker in workers {
        total.merge(&worker.stats().snapshot());
    }
    total
}

fn worker_loop(id: usize, ctx: TraversalContext, stats: Arc<WorkerStats>) {
    debug!(worker = id, "Worker starting");

    while !ctx.shutdown.load(Ordering::Acquire) {
        let task = match ctx.queue_rx.recv_timeout(IDLE_POLL) {
            Some(task) => task,
            None => continue,
        };

        // Resolves the task when this iteration ends, after any children
        // have been registered and enqueued.
        let _guard = TaskGuard::new(&ctx.tracker);
        resolve_task(id, &task, &ctx, &stats);
    }

    debug!(worker = id, "Worker stopping");
}

/// Do everything one task requires except marking it done.
pub(crate) fn resolve_task(id: usize, task: &Task, ctx: &TraversalContext, stats: &WorkerStats) {
    let path = task.path();

    match ctx.fs.classify(path) {
        Ok(EntryKind::File) => {
            let size = match ctx.fs.file_byte_length(path) {
                Ok(size) => size,
                Err(e) => {
                    warn!(worker = id, path = %path.display(), error = %e, "Cannot stat file; counting 0 bytes");
                    stats.record_error();
                    0
                }
            };
            trace!(worker = id, path = %path.display(), size, "File");
            ctx.sizes.add_bytes(task.owner(), size);
            stats.record_file();
        }
        Ok(EntryKind::Directory) => {
            stats.record_dir();
            expand_directory(id, task, ctx, stats);
        }
        Ok(EntryKind::Other) => {
            trace!(worker = id, path = %path.display(), "Not a file or directory; skipped");
            stats.record_other();
        }
        Err(e) => {
            warn!(worker = id, path = %path.display(), error = %e, "Path inaccessible; counting 0 bytes");
            stats.record_error();
        }
    }
}

/// Turn a directory task into one child task per entry.
///
/// Children are registered with the tracker before any of them becomes
/// visible in the queue. The parent is still unresolved here (the caller
/// resolves it afterwards), so the outstanding count cannot touch zero
/// in between.
fn expand_directory(id: usize, task: &Task, ctx: &TraversalContext, stats: &WorkerStats) {
    let path = task.path();

    let names = match ctx.fs.list_children(path) {
        Ok(names) => names,
        Err(e) => {
            warn!(worker = id, path = %path.display(), error = %e, "Cannot read directory; counting 0 bytes");
            stats.record_error();
            return;
        }
    };

    let mut children: Vec<Task> = Vec::new();
    if let Err(e) = children.try_reserve_exact(names.len()) {
        warn!(
            worker = id,
            path = %path.display(),
            entries = names.len(),
            error = %e,
            "Cannot allocate child tasks; directory contents dropped"
        );
        stats.record_error();
        return;
    }
    children.extend(
        names
            .iter()
            .filter(|name| !is_pseudo_entry(name))
            .map(|name| task.child(name)),
    );

    debug!(worker = id, path = %path.display(), children = children.len(), "Directory expanded");
    if children.is_empty() {
        return;
    }

    ctx.tracker.add(children.len());
    for child in children {
        enqueue_or_resolve(&ctx.queue_tx, &ctx.tracker, child);
    }
}

/// Push `task`; if the queue is gone, resolve it on the spot so the
/// outstanding count still drains.
pub(crate) fn enqueue_or_resolve(tx: &WorkQueueSender, tracker: &CompletionTracker, task: Task) {
    if let Err(e) = tx.send(task) {
        warn!(path = %e.0.path().display(), "Work queue closed; task dropped");
        tracker.done();
    }
}

fn is_pseudo_entry(name: &OsStr) -> bool {
    name.is_empty() || name == "." || name == ".."
}
