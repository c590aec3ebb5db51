use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

/// A filename folded once for repeated comparison against directory entries.
///
/// Folding is ASCII lower-casing only. Bytes outside `A-Z` compare as-is, so
/// non-ASCII names only match when they are byte-identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldedName {
    folded: Vec<u8>,
}

impl FoldedName {
    pub fn new(name: &OsStr) -> Self {
        Self {
            folded: fold_bytes(name.as_bytes()),
        }
    }

    pub fn matches(&self, candidate: &OsStr) -> bool {
        let candidate = candidate.as_bytes();
        candidate.len() == self.folded.len()
            && candidate
                .iter()
                .zip(&self.folded)
                .all(|(c, f)| c.to_ascii_lowercase() == *f)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.folded
    }
}

pub fn fold_bytes(input: &[u8]) -> Vec<u8> {
    input.to_ascii_lowercase()
}
