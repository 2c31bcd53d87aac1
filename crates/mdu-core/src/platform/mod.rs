//! Platform layer: the filesystem primitives the traversal engine consumes.

pub mod fs;

pub use fs::{EntryKind, FileSystem, LocalFs};
