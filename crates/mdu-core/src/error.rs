//! Fatal traversal errors.
//!
//! Only configuration problems and pool failures are errors. Anything that
//! goes wrong with an individual path inside the tree is absorbed by the
//! worker and counted as zero bytes.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraverseError {
    /// No paths were supplied; nothing is started.
    #[error("no paths given: at least one path is required")]
    NoPaths,

    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker {id}: {source}")]
    WorkerSpawn {
        id: usize,
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked; its share of the totals may be missing.
    #[error("worker {id} panicked")]
    WorkerPanicked { id: usize },
}
