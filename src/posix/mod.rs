pub mod real_fs;
pub mod symbols;

#[cfg(feature = "preload")]
pub mod preload;

pub use real_fs::RealFs;
