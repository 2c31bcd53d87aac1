//! mdu core: concurrent disk-usage traversal engine.
//!
//! This crate contains all traversal logic with zero presentation
//! dependencies. Argument parsing and output formatting live in `mdu-cli`.
//!
//! # Modules
//!
//! - [`model`]: Tasks, per-path totals, run reports and size formatting.
//! - [`platform`]: The filesystem collaborator (`classify`, `file_byte_length`, `list_children`).
//! - [`scanner`]: Work queue, completion tracker, size accumulator, worker pool and orchestrator.
//! - [`config`]: Worker-count normalisation and traversal settings.
//! - [`error`]: Fatal traversal errors.

pub mod config;
pub mod error;
pub mod model;
pub mod platform;
pub mod scanner;

pub use config::{normalize_worker_count, TraversalConfig, MAX_WORKERS};
pub use error::TraverseError;
pub use model::{PathTotal, Task, TraversalReport, TraversalStats};
pub use platform::{EntryKind, FileSystem, LocalFs};
pub use scanner::{run, Traversal};
