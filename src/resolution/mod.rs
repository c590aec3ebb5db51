pub mod cache;
pub mod exclusion;
pub mod resolver;
pub mod scanner;

#[cfg(test)]
pub(crate) mod fake;

pub use cache::ResolutionCache;
pub use exclusion::{ExclusionFilter, DEFAULT_EXCLUDED_PREFIXES};
pub use resolver::PathResolver;
pub use scanner::DirectoryScanner;
