//! Interposed libc entry points, exported when the crate is built with the
//! `preload` feature and loaded through `LD_PRELOAD`.
//!
//! Each entry point resolves its path argument through the process resolver
//! and hands the result to the real primitive. While a thread is inside the
//! resolver (including its lazy initialisation) every intercepted call goes
//! straight to the real primitive.

use core::ffi::{c_char, c_int};
use std::ffi::CString;
use std::ptr;
use std::sync::OnceLock;

use crate::ffi::resolve_c_path;
use crate::global::{self, ReentryGuard};
use crate::posix::symbols::lookup;

type OpenFn = unsafe extern "C" fn(*const c_char, c_int, ...) -> c_int;
type OpenatFn = unsafe extern "C" fn(c_int, *const c_char, c_int, ...) -> c_int;
type StatFn = unsafe extern "C" fn(*const c_char, *mut libc::stat) -> c_int;
type AccessFn = unsafe extern "C" fn(*const c_char, c_int) -> c_int;
type FopenFn = unsafe extern "C" fn(*const c_char, *const c_char) -> *mut libc::FILE;

struct RealOps {
    open: Option<OpenFn>,
    open64: Option<OpenFn>,
    openat: Option<OpenatFn>,
    stat: Option<StatFn>,
    lstat: Option<StatFn>,
    access: Option<AccessFn>,
    fopen: Option<FopenFn>,
}

impl RealOps {
    // Only dlsym here: no logging or file access, so nothing in this
    // initialiser can re-enter an interposed symbol.
    fn bind() -> Self {
        // SAFETY: each type alias matches the libc prototype of its symbol.
        unsafe {
            Self {
                open: lookup(c"open"),
                open64: lookup(c"open64"),
                openat: lookup(c"openat"),
                stat: lookup(c"stat"),
                lstat: lookup(c"lstat"),
                access: lookup(c"access"),
                fopen: lookup(c"fopen"),
            }
        }
    }

    fn missing(&self) -> impl Iterator<Item = &'static str> {
        [
            ("open", self.open.is_none()),
            ("open64", self.open64.is_none()),
            ("openat", self.openat.is_none()),
            ("stat", self.stat.is_none()),
            ("lstat", self.lstat.is_none()),
            ("access", self.access.is_none()),
            ("fopen", self.fopen.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
    }
}

static REAL: OnceLock<RealOps> = OnceLock::new();

fn real() -> &'static RealOps {
    REAL.get_or_init(RealOps::bind)
}

/// Logs the primitives that could not be bound. Called once logging is up.
pub(crate) fn report_missing() {
    if let Some(ops) = REAL.get() {
        for name in ops.missing() {
            log::error!("could not find original function {name}; calls to it will fail with ENOSYS");
        }
    }
}

fn fail_enosys() {
    // SAFETY: __errno_location always returns the calling thread's errno slot.
    unsafe {
        *libc::__errno_location() = libc::ENOSYS;
    }
}

/// Runs `call` with the resolved form of `path`, or with `path` itself when
/// resolution is disabled, re-entered or yields nothing better.
unsafe fn with_resolved<R>(path: *const c_char, call: impl FnOnce(*const c_char) -> R) -> R {
    let Some(_guard) = ReentryGuard::enter() else {
        return call(path);
    };
    let resolved: Option<CString> = global::resolver().and_then(|resolver| resolve_c_path(resolver, path));
    match resolved {
        Some(resolved) => call(resolved.as_ptr()),
        None => call(path),
    }
}

fn wants_mode(flags: c_int) -> bool {
    flags & libc::O_CREAT != 0 || flags & libc::O_TMPFILE == libc::O_TMPFILE
}

// `open` is variadic in C. The optional mode travels in the same register
// as a third fixed integer argument, so it is read as one here and only
// forwarded when the flags say it is present.

#[no_mangle]
pub unsafe extern "C" fn open(path: *const c_char, flags: c_int, mode: libc::mode_t) -> c_int {
    let Some(real_open) = real().open else {
        fail_enosys();
        return -1;
    };
    with_resolved(path, |path| {
        if wants_mode(flags) {
            real_open(path, flags, mode as libc::c_uint)
        } else {
            real_open(path, flags)
        }
    })
}

#[no_mangle]
pub unsafe extern "C" fn open64(path: *const c_char, flags: c_int, mode: libc::mode_t) -> c_int {
    let Some(real_open64) = real().open64 else {
        fail_enosys();
        return -1;
    };
    with_resolved(path, |path| {
        if wants_mode(flags) {
            real_open64(path, flags, mode as libc::c_uint)
        } else {
            real_open64(path, flags)
        }
    })
}

#[no_mangle]
pub unsafe extern "C" fn openat(
    dirfd: c_int,
    path: *const c_char,
    flags: c_int,
    mode: libc::mode_t,
) -> c_int {
    let Some(real_openat) = real().openat else {
        fail_enosys();
        return -1;
    };
    let forward = |path: *const c_char| {
        if wants_mode(flags) {
            real_openat(dirfd, path, flags, mode as libc::c_uint)
        } else {
            real_openat(dirfd, path, flags)
        }
    };
    // Relative to some other directory: nothing the resolver can see.
    let absolute = !path.is_null() && *path == b'/' as c_char;
    if dirfd == libc::AT_FDCWD || absolute {
        with_resolved(path, forward)
    } else {
        forward(path)
    }
}

#[no_mangle]
pub unsafe extern "C" fn stat(path: *const c_char, buf: *mut libc::stat) -> c_int {
    let Some(real_stat) = real().stat else {
        fail_enosys();
        return -1;
    };
    with_resolved(path, |path| real_stat(path, buf))
}

#[no_mangle]
pub unsafe extern "C" fn lstat(path: *const c_char, buf: *mut libc::stat) -> c_int {
    let Some(real_lstat) = real().lstat else {
        fail_enosys();
        return -1;
    };
    with_resolved(path, |path| real_lstat(path, buf))
}

#[no_mangle]
pub unsafe extern "C" fn access(path: *const c_char, amode: c_int) -> c_int {
    let Some(real_access) = real().access else {
        fail_enosys();
        return -1;
    };
    with_resolved(path, |path| real_access(path, amode))
}

#[no_mangle]
pub unsafe extern "C" fn fopen(path: *const c_char, mode: *const c_char) -> *mut libc::FILE {
    let Some(real_fopen) = real().fopen else {
        fail_enosys();
        return ptr::null_mut();
    };
    with_resolved(path, |path| real_fopen(path, mode))
}
