//! Unbounded FIFO of pending tasks, shared by every worker.
//!
//! Backed by an unbounded crossbeam channel: push never blocks, and a task
//! is handed to exactly one receiver. "Empty" only ever means "empty right
//! now"; whether more work can still arrive is the completion tracker's
//! call, not the queue's.

use crate::model::Task;
use crossbeam_channel::{unbounded, Receiver, SendError, Sender};
use std::time::Duration;

/// Owner of the task channel. Hands out cloneable sender/receiver handles.
///
/// Dropping the queue (and every handle) discards any tasks still queued.
pub struct WorkQueue {
    sender: Sender<Task>,
    receiver: Receiver<Task>,
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Handle for pushing tasks (clone one per worker).
    pub fn sender(&self) -> WorkQueueSender {
        WorkQueueSender {
            sender: self.sender.clone(),
        }
    }

    /// Handle for popping tasks (clone one per worker).
    pub fn receiver(&self) -> WorkQueueReceiver {
        WorkQueueReceiver {
            receiver: self.receiver.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }
}

/// Push side of the queue.
#[derive(Clone)]
pub struct WorkQueueSender {
    sender: Sender<Task>,
}

impl WorkQueueSender {
    /// Append `task`. Fails only if every receiver is gone, in which case
    /// the task is handed back.
    pub fn send(&self, task: Task) -> Result<(), SendError<Task>> {
        self.sender.send(task)
    }
}

/// Pop side of the queue.
#[derive(Clone)]
pub struct WorkQueueReceiver {
    receiver: Receiver<Task>,
}

impl WorkQueueReceiver {
    /// Take the oldest task without blocking.
    pub fn try_recv(&self) -> Option<Task> {
        self.receiver.try_recv().ok()
    }

    /// Take the oldest task, waiting up to `timeout` for one to arrive.
    ///
    /// `None` means nothing showed up in time (or the queue is gone); the
    /// caller decides whether to wait again.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Task> {
        self.receiver.recv_timeout(timeout).ok()
    }
}
