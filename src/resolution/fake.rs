//! In-memory [`RawFs`] used by the unit tests.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::rawfs::{DirEntries, RawFs};

#[derive(Debug, Default)]
pub struct FakeFs {
    // Insertion order doubles as enumeration order.
    nodes: Vec<PathBuf>,
    exists_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl FakeFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.insert(Path::new(path));
        self
    }

    fn insert(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.insert(parent);
            }
        }
        if !self.nodes.iter().any(|node| node == path) {
            self.nodes.push(path.to_path_buf());
        }
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.exists_calls() + self.list_calls()
    }
}

impl RawFs for FakeFs {
    fn exists(&self, path: &Path) -> bool {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        path == Path::new("/") || self.nodes.iter().any(|node| node == path)
    }

    fn list_directory<'a>(&'a self, dir: &Path) -> DirEntries<'a> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        // Relative entries are stored without a leading `./`.
        let dir = if dir == Path::new(".") {
            PathBuf::new()
        } else {
            dir.to_path_buf()
        };
        Box::new(self.nodes.iter().filter_map(move |node| {
            if node.parent() == Some(dir.as_path()) {
                node.file_name().map(OsString::from)
            } else {
                None
            }
        }))
    }
}
