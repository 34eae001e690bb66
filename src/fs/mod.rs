//! Filesystem access
//!
//! The scanner, metadata store and renderer never touch `std::fs` directly.
//! They go through [`FileSystem`], which has two implementations:
//!
//! - `OsFs`: the real filesystem
//! - `MemoryFs`: an in-memory tree with injectable failures, for tests

mod memory;
mod os;

use std::io;
use std::path::Path;

pub use memory::MemoryFs;
pub use os::OsFs;

/// What a stat probe found at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        self == EntryKind::Dir
    }
}

/// The filesystem operations the crate needs.
pub trait FileSystem {
    /// Names of the immediate children of a directory, in no particular order.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Classify a path as file or directory. Symbolic links are followed.
    fn stat(&self, path: &Path) -> io::Result<EntryKind>;

    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the whole content of a file. Readers never observe a partially
    /// written file.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        (**self).read_dir(path)
    }

    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        (**self).stat(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        (**self).create_dir_all(path)
    }
}
