use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;

/// Pseudo-filesystem roots that are never rewritten.
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["/dev", "/proc", "/sys"];

/// Byte-prefix filter for paths the resolver must leave alone.
///
/// Matching is case-sensitive and performs no normalization: `/dev` excludes
/// `/dev/null` and `/devices` alike, but not `//dev` or `/DEV`.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    prefixes: Vec<OsString>,
}

impl ExclusionFilter {
    pub fn new<I, P>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<OsString>,
    {
        let prefixes = prefixes
            .into_iter()
            .map(Into::into)
            .filter(|prefix: &OsString| !prefix.is_empty())
            .collect();
        Self { prefixes }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_EXCLUDED_PREFIXES.iter().copied())
    }

    pub fn is_excluded(&self, path: &OsStr) -> bool {
        let bytes = path.as_bytes();
        self.prefixes
            .iter()
            .any(|prefix| bytes.starts_with(prefix.as_bytes()))
    }

    pub fn prefixes(&self) -> &[OsString] {
        &self.prefixes
    }
}
