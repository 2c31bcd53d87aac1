//! Per-argument byte totals, updated concurrently by every worker.
//!
//! One atomic counter per top-level path, indexed by the task's owner.
//! Adds are lock-free `fetch_add`s, so no update is ever lost and no
//! worker holds a lock while it does filesystem I/O.

use crate::model::PathTotal;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

#[derive(Debug)]
struct Slot {
    path: PathBuf,
    total: AtomicU64,
}

#[derive(Debug)]
pub struct SizeAccumulator {
    slots: Vec<Slot>,
}

impl SizeAccumulator {
    /// One zeroed total per path, in the order given.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            slots: paths
                .into_iter()
                .map(|p| Slot {
                    path: p.into(),
                    total: AtomicU64::new(0),
                })
                .collect(),
        }
    }

    /// Credit `bytes` to the argument at `owner`.
    pub fn add_bytes(&self, owner: usize, bytes: u64) {
        match self.slots.get(owner) {
            Some(slot) => {
                slot.total.fetch_add(bytes, Ordering::Relaxed);
            }
            None => warn!(owner, bytes, "Bytes credited to unknown owner; dropped"),
        }
    }

    /// Totals in input order.
    ///
    /// Only call once every writer has finished (the pool is joined);
    /// earlier reads are a point-in-time view.
    pub fn snapshot(&self) -> Vec<PathTotal> {
        self.slots
            .iter()
            .map(|slot| PathTotal {
                path: slot.path.clone(),
                total_bytes: slot.total.load(Ordering::Relaxed),
            })
            .collect()
    }
}
