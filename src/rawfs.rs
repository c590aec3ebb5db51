use std::ffi::OsString;
use std::path::Path;

/// Names produced by [`RawFs::list_directory`]. Consumed once, in whatever
/// order the filesystem hands them out.
pub type DirEntries<'a> = Box<dyn Iterator<Item = OsString> + 'a>;

/// Filesystem primitives the resolver is allowed to use.
///
/// Implementations must never route through the interposed entry points:
/// the resolver calls these while it is itself servicing an intercepted call.
pub trait RawFs: Send + Sync {
    /// True iff metadata can be retrieved for `path` exactly as given.
    fn exists(&self, path: &Path) -> bool;

    /// Entry names in `dir`, excluding `.` and `..`. A missing or unreadable
    /// directory yields an empty sequence.
    fn list_directory<'a>(&'a self, dir: &Path) -> DirEntries<'a>;
}

impl<T: RawFs + ?Sized> RawFs for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn list_directory<'a>(&'a self, dir: &Path) -> DirEntries<'a> {
        (**self).list_directory(dir)
    }
}
