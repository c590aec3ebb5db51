use core::ffi::{c_char, c_int};
use std::ffi::{CStr, CString, OsStr, OsString};
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::common::types::BindError;
use crate::posix::symbols::bind;
use crate::rawfs::{DirEntries, RawFs};

type StatFn = unsafe extern "C" fn(*const c_char, *mut libc::stat) -> c_int;
type OpendirFn = unsafe extern "C" fn(*const c_char) -> *mut libc::DIR;
type ReaddirFn = unsafe extern "C" fn(*mut libc::DIR) -> *mut libc::dirent;
type ClosedirFn = unsafe extern "C" fn(*mut libc::DIR) -> c_int;

/// [`RawFs`] over the libc primitives found behind this object with
/// `dlsym(RTLD_NEXT, ..)`, so calls never land in the interposed entry points.
#[derive(Clone, Copy, Debug)]
pub struct RealFs {
    stat: StatFn,
    opendir: OpendirFn,
    readdir: ReaddirFn,
    closedir: ClosedirFn,
}

impl RealFs {
    pub fn bind() -> Result<Self, BindError> {
        // SAFETY: each type alias matches the libc prototype of its symbol.
        unsafe {
            Ok(Self {
                stat: bind::<StatFn>(c"stat")?,
                opendir: bind::<OpendirFn>(c"opendir")?,
                readdir: bind::<ReaddirFn>(c"readdir")?,
                closedir: bind::<ClosedirFn>(c"closedir")?,
            })
        }
    }
}

fn to_c_path(path: &Path) -> Option<CString> {
    CString::new(path.as_os_str().as_bytes()).ok()
}

impl RawFs for RealFs {
    fn exists(&self, path: &Path) -> bool {
        let Some(c_path) = to_c_path(path) else {
            return false;
        };
        let mut buf = MaybeUninit::<libc::stat>::uninit();
        // SAFETY: c_path is NUL-terminated and buf is large enough for `struct stat`.
        unsafe { (self.stat)(c_path.as_ptr(), buf.as_mut_ptr()) == 0 }
    }

    fn list_directory<'a>(&'a self, dir: &Path) -> DirEntries<'a> {
        let Some(c_path) = to_c_path(dir) else {
            return Box::new(std::iter::empty());
        };
        // SAFETY: c_path is NUL-terminated.
        let handle = unsafe { (self.opendir)(c_path.as_ptr()) };
        if handle.is_null() {
            log::trace!(
                "opendir {} failed: {}",
                dir.display(),
                io::Error::last_os_error()
            );
            return Box::new(std::iter::empty());
        }
        Box::new(DirStream { fs: self, handle })
    }
}

/// Open directory stream; closed on drop.
struct DirStream<'a> {
    fs: &'a RealFs,
    handle: *mut libc::DIR,
}

impl Iterator for DirStream<'_> {
    type Item = OsString;

    fn next(&mut self) -> Option<OsString> {
        loop {
            // SAFETY: handle came from a successful opendir and is not yet closed.
            let entry = unsafe { (self.fs.readdir)(self.handle) };
            if entry.is_null() {
                return None;
            }
            // SAFETY: readdir returned a valid dirent whose d_name is NUL-terminated.
            let name = unsafe { CStr::from_ptr((*entry).d_name.as_ptr()) }.to_bytes();
            if name == b"." || name == b".." {
                continue;
            }
            return Some(OsStr::from_bytes(name).to_os_string());
        }
    }
}

impl Drop for DirStream<'_> {
    fn drop(&mut self) {
        // SAFETY: handle is open and owned by this stream.
        unsafe {
            (self.fs.closedir)(self.handle);
        }
    }
}
