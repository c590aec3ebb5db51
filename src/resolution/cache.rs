use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Append-only map from the literal requested path to its on-disk spelling.
///
/// Keys are the raw input bytes, so `a//b` and `a/b` are distinct entries, as
/// are differently cased requests for the same file. Entries are never
/// evicted; a value may go stale if the directory changes after it was cached.
///
/// Relative requests are stored as given, not against the working directory.
/// After a `chdir`, a relative key still returns the spelling found under the
/// old directory, which may not exist (or may name a different file) under
/// the new one.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<OsString, PathBuf>>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &OsStr) -> Option<PathBuf> {
        // A poisoned lock still holds a consistent map: every write is a
        // single insert.
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    pub fn put(&self, key: &OsStr, value: &Path) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_os_string(), value.to_path_buf());
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
