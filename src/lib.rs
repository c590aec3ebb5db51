//! Case-insensitive path resolution for programs that expect it, running on
//! a case-sensitive filesystem.
//!
//! [`PathResolver`] maps a requested path onto the on-disk path that differs
//! only in ASCII letter case. Built with the `preload` feature, the shared
//! object interposes `open`, `stat` and friends so any dynamically linked
//! program picks up the rewriting through `LD_PRELOAD`.

mod common;
pub mod config;
mod ffi;
pub mod global;
pub mod logging;
pub mod posix;
pub mod rawfs;
pub mod resolution;

#[cfg(not(target_os = "linux"))]
compile_error!("insensitive only supports Linux targets.");

pub use crate::common::fold::FoldedName;
pub use crate::common::types::*;
pub use crate::config::Config;
pub use crate::ffi::*;
pub use crate::posix::RealFs;
pub use crate::rawfs::{DirEntries, RawFs};
pub use crate::resolution::{
    DirectoryScanner, ExclusionFilter, PathResolver, ResolutionCache, DEFAULT_EXCLUDED_PREFIXES,
};
