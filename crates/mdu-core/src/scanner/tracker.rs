//! Outstanding-work counter with a blocking wait for zero.
//!
//! The count is the number of tasks created (seeded or discovered) minus
//! the number fully resolved. It reaches zero exactly once per run, and
//! only after the last task is resolved, provided every producer follows
//! one rule: `add(k)` for new tasks *before* they are pushed, and `done()`
//! for the parent only *after* that push. A worker holding an unresolved
//! task keeps the count above zero while it registers the children, so no
//! observer can ever see a false zero.

use parking_lot::{Condvar, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct CompletionTracker {
    outstanding: Mutex<usize>,
    drained: Condvar,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `n` newly created tasks.
    pub fn add(&self, n: usize) {
        if n == 0 {
            return;
        }
        *self.outstanding.lock() += n;
    }

    /// Mark one task fully resolved. Wakes every waiter on the transition
    /// to zero.
    pub fn done(&self) {
        let mut outstanding = self.outstanding.lock();
        debug_assert!(*outstanding > 0, "done() without matching add()");
        *outstanding = outstanding.saturating_sub(1);
        if *outstanding == 0 {
            self.drained.notify_all();
        }
    }

    /// Current count. Only meaningful as a snapshot.
    pub fn outstanding(&self) -> usize {
        *self.outstanding.lock()
    }

    /// Block until the count is zero.
    pub fn wait_until_zero(&self) {
        let mut outstanding = self.outstanding.lock();
        while *outstanding != 0 {
            self.drained.wait(&mut outstanding);
        }
    }

    /// Block until the count is zero or `timeout` elapses.
    /// Returns `true` if the count is zero.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut outstanding = self.outstanding.lock();
        if *outstanding != 0 {
            self.drained.wait_for(&mut outstanding, timeout);
        }
        *outstanding == 0
    }
}

/// Calls [`CompletionTracker::done`] when dropped, so a task is resolved
/// on every exit path of the code that handles it.
pub struct TaskGuard<'a> {
    tracker: &'a CompletionTracker,
}

impl<'a> TaskGuard<'a> {
    pub fn new(tracker: &'a CompletionTracker) -> Self {
        Self { tracker }
    }
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        self.tracker.done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_add_and_done() {
        let tracker = CompletionTracker::new();
        tracker.add(3);
        assert_eq!(tracker.outstanding(), 3);
        tracker.done();
        tracker.done();
        assert_eq!(tracker.outstanding(), 1);
        tracker.done();
        assert_eq!(tracker.outstanding(), 0);
    }

    #[test]
    fn test_wait_returns_immediately_at_zero() {
        let tracker = CompletionTracker::new();
        tracker.wait_until_zero();
        assert!(tracker.wait_timeout(Duration::from_millis(1)));
    }

    #[test]
    fn test_wait_timeout_with_work_pending() {
        let tracker = CompletionTracker::new();
        tracker.add(1);
        assert!(!tracker.wait_timeout(Duration::from_millis(5)));
    }

    #[test]
    fn test_guard_resolves_on_drop() {
        let tracker = CompletionTracker::new();
        tracker.add(1);
        {
            let _guard = TaskGuard::new(&tracker);
            assert_eq!(tracker.outstanding(), 1);
        }
        assert_eq!(tracker.outstanding(), 0);
    }

    #[test]
    fn test_waiter_wakes_when_last_task_resolves() {
        let tracker = Arc::new(CompletionTracker::new());
        tracker.add(2);

        let worker = {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                tracker.done();
                thread::sleep(Duration::from_millis(20));
                tracker.done();
            })
        };

        let start = Instant::now();
        tracker.wait_until_zero();
        assert_eq!(tracker.outstanding(), 0);
        assert!(start.elapsed() >= Duration::from_millis(30));
        worker.join().unwrap();
    }

    /// Parent expands into children before resolving itself: a waiter
    /// never returns while any descendant is unresolved.
    #[test]
    fn test_add_before_done_never_reaches_zero_early() {
        let tracker = Arc::new(CompletionTracker::new());
        let resolved = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        tracker.add(1);

        let expander = {
            let tracker = Arc::clone(&tracker);
            let resolved = Arc::clone(&resolved);
            thread::spawn(move || {
                // Root task: three generations of 4 children each.
                let mut frontier = 1;
                for _ in 0..3 {
                    let children = frontier * 4;
                    tracker.add(children);
                    for _ in 0..frontier {
                        tracker.done();
                    }
                    frontier = children;
                }
                for _ in 0..frontier {
                    resolved.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    tracker.done();
                }
            })
        };

        tracker.wait_until_zero();
        assert_eq!(resolved.load(std::sync::atomic::Ordering::SeqCst), 64);
        expander.join().unwrap();
    }
}
