//! Filesystem collaborator.
//!
//! The engine never touches `std::fs` directly; it goes through the
//! [`FileSystem`] trait so every primitive it needs is one call with one
//! error. Errors are returned, not swallowed: the worker decides that a
//! failure means "zero bytes" and logs it.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

/// What a path turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A regular file: contributes its byte length.
    File,
    /// A directory: expanded into one task per child.
    Directory,
    /// Symlink, socket, FIFO, device, ...: contributes nothing.
    Other,
}

/// Filesystem primitives used by the workers.
///
/// Implementations are shared by every worker thread, hence `Send + Sync`.
pub trait FileSystem: Send + Sync {
    /// Classify `path` without following symbolic links.
    fn classify(&self, path: &Path) -> io::Result<EntryKind>;

    /// Byte length of the file at `path`.
    fn file_byte_length(&self, path: &Path) -> io::Result<u64>;

    /// Names of the immediate entries of the directory at `path`,
    /// excluding `.` and `..`.
    fn list_children(&self, path: &Path) -> io::Result<Vec<OsString>>;
}

/// The real, local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn classify(&self, path: &Path) -> io::Result<EntryKind> {
        // lstat: a link is reported as itself, so link cycles are never entered.
        let file_type = fs::symlink_metadata(path)?.file_type();
        Ok(if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        })
    }

    fn file_byte_length(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::symlink_metadata(path)?.len())
    }

    fn list_children(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let entries = fs::read_dir(path)?;
        Ok(collect_names(path, entries.map(|entry| entry.map(|e| e.file_name()))))
    }
}

/// Gather entry names from a directory read, skipping entries that fail.
/// A single bad entry never hides its siblings.
fn collect_names<I>(dir: &Path, entries: I) -> Vec<OsString>
where
    I: IntoIterator<Item = io::Result<OsString>>,
{
    let mut names = Vec::new();
    for entry in entries {
        match entry {
            Ok(name) => names.push(name),
            Err(e) => warn!(path = %dir.display(), error = %e, "Skipping unreadable directory entry"),
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn classify_file_and_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f.bin");
        fs::File::create(&file).unwrap().write_all(&[0u8; 7]).unwrap();

        assert_eq!(LocalFs.classify(tmp.path()).unwrap(), EntryKind::Directory);
        assert_eq!(LocalFs.classify(&file).unwrap(), EntryKind::File);
        assert_eq!(LocalFs.file_byte_length(&file).unwrap(), 7);
    }

    #[test]
    fn classify_missing_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFs.classify(&tmp.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        let tmp = TempDir::new().unwrap();
        let link = tmp.path().join("loop");
        std::os::unix::fs::symlink(tmp.path(), &link).unwrap();
        assert_eq!(LocalFs.classify(&link).unwrap(), EntryKind::Other);
    }

    #[test]
    fn list_children_excludes_pseudo_entries() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::File::create(tmp.path().join("a.txt")).unwrap();

        let mut names = LocalFs.list_children(tmp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec![OsString::from("a.txt"), OsString::from("sub")]);
    }

    #[test]
    fn failing_entry_keeps_its_siblings() {
        let entries = vec![
            Ok(OsString::from("a.txt")),
            Err(io::Error::from(io::ErrorKind::PermissionDenied)),
            Ok(OsString::from("b.txt")),
        ];
        let names = collect_names(Path::new("/dir"), entries);
        assert_eq!(names, vec![OsString::from("a.txt"), OsString::from("b.txt")]);
    }

    #[test]
    fn list_children_of_file_fails() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain");
        fs::File::create(&file).unwrap();
        assert!(LocalFs.list_children(&file).is_err());
    }
}
