use crate::common::types::*;
use crate::global::{self, ReentryGuard};
use crate::logging;
use crate::rawfs::RawFs;
use crate::resolution::PathResolver;

use core::ffi::c_char;
use std::borrow::Cow;
use std::ffi::{CStr, CString, OsStr};
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::ptr;

/// Resolves a C path through `resolver`.
///
/// Returns `None` when the path should be used as given: null input, no
/// better spelling, or a panic inside resolution.
///
/// # Safety
///
/// `path` must be null or point to a NUL-terminated string.
pub unsafe fn resolve_c_path<F: RawFs>(
    resolver: &PathResolver<F>,
    path: *const c_char,
) -> Option<CString> {
    if path.is_null() {
        return None;
    }
    let path = Path::new(OsStr::from_bytes(CStr::from_ptr(path).to_bytes()));
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| match resolver.resolve(path) {
        Cow::Borrowed(_) => None,
        Cow::Owned(resolved) => CString::new(resolved.into_os_string().into_vec()).ok(),
    }));
    match outcome {
        Ok(resolved) => resolved,
        Err(_) => {
            log::error!("resolution of {} panicked; using it unchanged", path.display());
            None
        }
    }
}

/// Resolves `path` through the process resolver.
///
/// Returns a `malloc`ed string the caller releases with
/// [`insensitive_free_string`], or null when `path` is null or allocation
/// fails. When resolution is disabled the copy equals the input.
#[no_mangle]
pub unsafe extern "C" fn insensitive_resolve(path: *const c_char) -> *mut c_char {
    if path.is_null() {
        return ptr::null_mut();
    }
    let resolved = ReentryGuard::enter().and_then(|_guard| {
        global::resolver().and_then(|resolver| resolve_c_path(resolver, path))
    });
    match resolved {
        Some(resolved) => libc::strdup(resolved.as_ptr()),
        None => libc::strdup(path),
    }
}

#[no_mangle]
pub unsafe extern "C" fn insensitive_free_string(value: *mut c_char) {
    if value.is_null() {
        return;
    }
    libc::free(value.cast());
}

#[no_mangle]
pub unsafe extern "C" fn insensitive_get_metrics(out_metrics: *mut ResolverMetrics) -> InsensitiveStatus {
    let Some(out_metrics) = out_metrics.as_mut() else {
        return InsensitiveStatus::InvalidArgument;
    };
    let Some(_guard) = ReentryGuard::enter() else {
        return InsensitiveStatus::IoError;
    };
    match global::resolver() {
        Some(resolver) => {
            *out_metrics = resolver.metrics();
            InsensitiveStatus::Ok
        }
        None => {
            *out_metrics = ResolverMetrics::default();
            InsensitiveStatus::Disabled
        }
    }
}

#[no_mangle]
pub extern "C" fn insensitive_log_set_level(level: i32) -> InsensitiveStatus {
    match InsensitiveLogLevel::from_i32(level) {
        Some(level) => logging::log_set_level(level),
        None => InsensitiveStatus::InvalidArgument,
    }
}
