//! In-memory `FileSystem` with fault injection

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::tree::StructureNode;

use super::{EntryKind, FileSystem};

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(String),
}

/// A filesystem that lives entirely in memory.
///
/// Paths are compared component-wise, so `/repo/a` and `/repo/a/` are the
/// same entry. Parents are created implicitly when adding entries. Failures
/// can be injected per path for `read_dir`, `stat` and `write`.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    failing_reads: RefCell<BTreeSet<PathBuf>>,
    failing_stats: RefCell<BTreeSet<PathBuf>>,
    failing_writes: RefCell<BTreeSet<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_parents(&self, path: &Path) {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.ancestors().skip(1) {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Dir);
        }
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let path = path.as_ref();
        self.add_parents(path);
        self.nodes.borrow_mut().insert(path.to_path_buf(), Node::Dir);
        self
    }

    pub fn add_file(&self, path: impl AsRef<Path>, contents: &str) -> &Self {
        let path = path.as_ref();
        self.add_parents(path);
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(contents.to_string()));
        self
    }

    /// Materialize a structure tree below `root`. Files get empty contents.
    pub fn add_structure(&self, root: impl AsRef<Path>, structure: &StructureNode) -> &Self {
        let root = root.as_ref();
        match structure {
            StructureNode::File => {
                self.add_file(root, "");
            }
            StructureNode::Dir(children) => {
                self.add_dir(root);
                for (name, child) in children.iter() {
                    self.add_structure(root.join(name), child);
                }
            }
        }
        self
    }

    /// Make `read_dir` fail with `PermissionDenied` for this path.
    pub fn fail_read_dir(&self, path: impl AsRef<Path>) -> &Self {
        self.failing_reads
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
        self
    }

    /// Make `stat` fail with `PermissionDenied` for this path.
    pub fn fail_stat(&self, path: impl AsRef<Path>) -> &Self {
        self.failing_stats
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
        self
    }

    /// Make `write` fail with `PermissionDenied` for this path.
    pub fn fail_write(&self, path: impl AsRef<Path>) -> &Self {
        self.failing_writes
            .borrow_mut()
            .insert(path.as_ref().to_path_buf());
        self
    }

    /// Contents of a file, or `None` if the path is missing or a directory.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.nodes.borrow().get(path.as_ref()) {
            Some(Node::File(contents)) => Some(contents.clone()),
            _ => None,
        }
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        matches!(self.nodes.borrow().get(path.as_ref()), Some(Node::Dir))
    }
}

fn denied(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("permission denied: {}", path.display()),
    )
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

impl FileSystem for MemoryFs {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        if self.failing_reads.borrow().contains(path) {
            return Err(denied(path));
        }
        let nodes = self.nodes.borrow();
        match nodes.get(path) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {}", path.display()),
                ));
            }
            None => return Err(not_found(path)),
        }
        Ok(nodes
            .keys()
            .filter(|candidate| candidate.parent() == Some(path))
            .filter_map(|candidate| candidate.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .collect())
    }

    fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        if self.failing_stats.borrow().contains(path) {
            return Err(denied(path));
        }
        match self.nodes.borrow().get(path) {
            Some(Node::Dir) => Ok(EntryKind::Dir),
            Some(Node::File(_)) => Ok(EntryKind::File),
            None => Err(not_found(path)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.nodes.borrow().contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        match self.nodes.borrow().get(path) {
            Some(Node::File(contents)) => Ok(contents.clone()),
            Some(Node::Dir) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {}", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if self.failing_writes.borrow().contains(path) {
            return Err(denied(path));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !self.is_dir(parent) {
                return Err(not_found(parent));
            }
        }
        if self.is_dir(path) {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {}", path.display()),
            ));
        }
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(contents.to_string()));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if self.contents(path).is_some() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("file exists: {}", path.display()),
            ));
        }
        self.add_dir(path);
        Ok(())
    }
}
