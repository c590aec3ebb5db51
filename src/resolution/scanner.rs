use std::ffi::{OsStr, OsString};
use std::path::Path;

use crate::common::fold::FoldedName;
use crate::rawfs::RawFs;

/// Linear, case-insensitive search of a single directory.
pub struct DirectoryScanner<F> {
    fs: F,
}

impl<F: RawFs> DirectoryScanner<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// First entry of `dir`, in enumeration order, that equals `target` once
    /// both are ASCII lower-cased.
    ///
    /// When several entries fold to the same name (`A` and `a`) the winner is
    /// whichever the filesystem lists first; no ordering is imposed. A missing
    /// or unreadable directory is reported as no match.
    pub fn find_case_insensitive(&self, dir: &Path, target: &OsStr) -> Option<OsString> {
        let wanted = FoldedName::new(target);
        let found = self
            .fs
            .list_directory(scan_dir(dir))
            .find(|entry| wanted.matches(entry));
        match &found {
            Some(entry) => log::trace!(
                "scan of {} matched {:?} for {:?}",
                dir.display(),
                entry,
                target
            ),
            None => log::trace!("scan of {} found no match for {:?}", dir.display(), target),
        }
        found
    }
}

/// The empty parent of a bare relative name means the working directory.
fn scan_dir(dir: &Path) -> &Path {
    if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    }
}
