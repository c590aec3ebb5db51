use core::ffi::c_void;
use std::ffi::CStr;
use std::mem;

use crate::common::types::BindError;

/// Address of the next definition of `name` after this object in symbol
/// lookup order, i.e. the implementation an interposed symbol shadows.
///
/// # Safety
///
/// `F` must be a function pointer type whose signature matches the C
/// prototype of `name`.
pub unsafe fn lookup<F: Copy>(name: &CStr) -> Option<F> {
    debug_assert_eq!(mem::size_of::<F>(), mem::size_of::<*mut c_void>());
    let ptr = libc::dlsym(libc::RTLD_NEXT, name.as_ptr());
    if ptr.is_null() {
        return None;
    }
    Some(mem::transmute_copy::<*mut c_void, F>(&ptr))
}

/// Like [`lookup`], but reports a missing symbol.
///
/// # Safety
///
/// Same contract as [`lookup`].
pub unsafe fn bind<F: Copy>(name: &'static CStr) -> Result<F, BindError> {
    lookup(name).ok_or_else(|| {
        let name = name.to_str().unwrap_or("<non-utf8 symbol>");
        log::error!("could not find original function {name}");
        BindError::MissingSymbol(name)
    })
}
