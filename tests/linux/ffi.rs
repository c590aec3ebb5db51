use std::ffi::{CStr, CString};
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use insensitive::*;

fn c_path(path: &Path) -> CString {
    CString::new(path.as_os_str().as_bytes()).expect("path without NUL")
}

fn resolve_via_abi(path: &Path) -> String {
    let _guard = crate::LOG_MUTEX.lock().unwrap_or_else(|err| err.into_inner());
    let input = c_path(path);
    let out = unsafe { insensitive_resolve(input.as_ptr()) };
    assert!(!out.is_null());
    let value = unsafe { CStr::from_ptr(out) }.to_string_lossy().into_owned();
    unsafe { insensitive_free_string(out) };
    value
}

#[test]
fn null_path_yields_null() {
    let out = unsafe { insensitive_resolve(ptr::null()) };
    assert!(out.is_null());
    unsafe { insensitive_free_string(out) };
}

#[test]
fn abi_resolves_mis_cased_path() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let actual = temp.path().join("Include").join("Config.h");
    fs::create_dir_all(actual.parent().unwrap()).unwrap();
    fs::write(&actual, b"").unwrap();
    if temp.path().join("include").exists() {
        eprintln!("skipped: temp filesystem is case-insensitive");
        return;
    }

    let resolved = resolve_via_abi(&temp.path().join("include/config.H"));
    assert_eq!(Path::new(&resolved), actual);
}

#[test]
fn abi_copies_unresolvable_path() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let request = temp.path().join("absent.h");
    let resolved = resolve_via_abi(&request);
    assert_eq!(Path::new(&resolved), request);
}

#[test]
fn resolve_c_path_reports_only_rewrites() {
    let temp = tempfile::tempdir().expect("create temp dir");
    fs::write(temp.path().join("Makefile"), b"").unwrap();
    let resolver = PathResolver::new(RealFs::bind().unwrap(), ExclusionFilter::with_defaults());

    let exact = c_path(&temp.path().join("Makefile"));
    assert_eq!(unsafe { resolve_c_path(&resolver, exact.as_ptr()) }, None);
    assert_eq!(unsafe { resolve_c_path(&resolver, ptr::null()) }, None);

    if !temp.path().join("makefile").exists() {
        let request = c_path(&temp.path().join("makefile"));
        let resolved = unsafe { resolve_c_path(&resolver, request.as_ptr()) };
        assert_eq!(resolved, Some(exact));
    }
}

#[test]
fn metrics_require_an_output_pointer() {
    let status = unsafe { insensitive_get_metrics(ptr::null_mut()) };
    assert_eq!(status, InsensitiveStatus::InvalidArgument);

    let _guard = crate::LOG_MUTEX.lock().unwrap_or_else(|err| err.into_inner());
    let mut metrics = ResolverMetrics::default();
    let status = unsafe { insensitive_get_metrics(&mut metrics) };
    assert!(matches!(
        status,
        InsensitiveStatus::Ok | InsensitiveStatus::Disabled
    ));
}

#[test]
fn log_level_is_validated() {
    let _guard = crate::LOG_MUTEX.lock().unwrap_or_else(|err| err.into_inner());
    assert_eq!(insensitive_log_set_level(42), InsensitiveStatus::InvalidArgument);
    assert_eq!(
        insensitive_log_set_level(InsensitiveLogLevel::Warn as i32),
        InsensitiveStatus::Ok
    );
}
