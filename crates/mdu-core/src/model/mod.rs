//! Data model for a traversal run.
//!
//! Tasks flow through the work queue; `PathTotal` and `TraversalReport`
//! are what a finished run hands back to the caller.
pub mod report;
pub mod size;
pub mod task;

pub use report::{PathTotal, TraversalReport, TraversalStats};
pub use task::Task;
