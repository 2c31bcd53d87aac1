//! A single unit of traversal work.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// One path awaiting classification, tagged with the top-level argument
/// whose total its bytes are credited to.
///
/// Tasks are never mutated after creation; expanding a directory produces
/// new tasks via [`Task::child`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    path: PathBuf,
    owner: usize,
}

impl Task {
    /// Create a task for `path`, owned by the top-level argument at `owner`.
    pub fn new(path: impl Into<PathBuf>, owner: usize) -> Self {
        Self {
            path: path.into(),
            owner,
        }
    }

    /// The filesystem path this task examines.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Index of the top-level argument this task descends from.
    pub fn owner(&self) -> usize {
        self.owner
    }

    /// Task for the directory entry `name` inside this task's path.
    /// The owner index is inherited unchanged.
    pub fn child(&self, name: &OsStr) -> Self {
        Self {
            path: self.path.join(name),
            owner: self.owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_inherits_owner() {
        let parent = Task::new("/tmp/a", 3);
        let child = parent.child(OsStr::new("b"));
        assert_eq!(child.owner(), 3);
        assert_eq!(child.path(), Path::new("/tmp/a/b"));
    }

    #[test]
    fn nested_children_keep_joining() {
        let root = Task::new("root", 0);
        let leaf = root.child(OsStr::new("x")).child(OsStr::new("y.txt"));
        assert_eq!(leaf.path(), Path::new("root/x/y.txt"));
        assert_eq!(leaf.owner(), 0);
    }
}
