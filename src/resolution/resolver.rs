use std::borrow::Cow;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::common::types::ResolverMetrics;
use crate::rawfs::RawFs;
use crate::resolution::cache::ResolutionCache;
use crate::resolution::exclusion::ExclusionFilter;
use crate::resolution::scanner::DirectoryScanner;

#[derive(Debug, Default)]
struct MetricsCounters {
    exact_hits: AtomicU64,
    excluded: AtomicU64,
    cache_hits: AtomicU64,
    scans: AtomicU64,
    scan_matches: AtomicU64,
    no_matches: AtomicU64,
}

impl MetricsCounters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> ResolverMetrics {
        ResolverMetrics {
            exact_hits: self.exact_hits.load(Ordering::Relaxed),
            excluded: self.excluded.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            scans: self.scans.load(Ordering::Relaxed),
            scan_matches: self.scan_matches.load(Ordering::Relaxed),
            no_matches: self.no_matches.load(Ordering::Relaxed),
        }
    }
}

/// Maps a requested path onto the on-disk path that differs from it only in
/// ASCII letter case.
///
/// `resolve` never fails. Whenever no better spelling can be found the input
/// comes back untouched, so the caller's real filesystem operation reports
/// its own "not found".
///
/// Safe to share between threads. Two threads resolving the same uncached
/// path may both scan and both populate the cache; the results are equal.
pub struct PathResolver<F> {
    exclusions: ExclusionFilter,
    cache: ResolutionCache,
    scanner: DirectoryScanner<F>,
    metrics: MetricsCounters,
}

impl<F: RawFs> PathResolver<F> {
    pub fn new(fs: F, exclusions: ExclusionFilter) -> Self {
        Self {
            exclusions,
            cache: ResolutionCache::new(),
            scanner: DirectoryScanner::new(fs),
            metrics: MetricsCounters::default(),
        }
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn exclusions(&self) -> &ExclusionFilter {
        &self.exclusions
    }

    pub fn metrics(&self) -> ResolverMetrics {
        self.metrics.snapshot()
    }

    fn fs(&self) -> &F {
        self.scanner.fs()
    }

    pub fn resolve<'a>(&self, path: &'a Path) -> Cow<'a, Path> {
        if !self.is_candidate(path) {
            return Cow::Borrowed(path);
        }
        if self.fs().exists(path) {
            MetricsCounters::bump(&self.metrics.exact_hits);
            return Cow::Borrowed(path);
        }
        self.resolve_missing(path)
    }

    /// Empty paths, excluded paths, bare roots and paths naming a directory
    /// through a trailing `/` or `/.` are never rewritten and never touch the
    /// filesystem.
    fn is_candidate(&self, path: &Path) -> bool {
        if path.as_os_str().is_empty() {
            return false;
        }
        if self.exclusions.is_excluded(path.as_os_str()) {
            MetricsCounters::bump(&self.metrics.excluded);
            log::trace!("{} is excluded; passing through", path.display());
            return false;
        }
        // `parent`/`file_name` drop these suffixes; rebuilding without them
        // would turn a failing `Foo/` lookup on a regular file into a success.
        let bytes = path.as_os_str().as_bytes();
        if bytes.ends_with(b"/") || bytes.ends_with(b"/.") {
            return false;
        }
        path.parent().is_some() && path.file_name().is_some()
    }

    /// Resolution of a candidate path already known not to exist as spelled.
    fn resolve_missing<'a>(&self, path: &'a Path) -> Cow<'a, Path> {
        if let Some(hit) = self.cache.get(path.as_os_str()) {
            MetricsCounters::bump(&self.metrics.cache_hits);
            log::trace!("cache hit {} -> {}", path.display(), hit.display());
            return Cow::Owned(hit);
        }

        let (Some(parent), Some(filename)) = (path.parent(), path.file_name()) else {
            return Cow::Borrowed(path);
        };

        let repaired_parent = self.repair_parent(parent);
        let dir = repaired_parent.as_deref().unwrap_or(parent);

        MetricsCounters::bump(&self.metrics.scans);
        match self.scanner.find_case_insensitive(dir, filename) {
            Some(actual) => {
                let resolved = dir.join(actual);
                MetricsCounters::bump(&self.metrics.scan_matches);
                log::debug!("resolved {} -> {}", path.display(), resolved.display());
                self.cache.put(path.as_os_str(), &resolved);
                Cow::Owned(resolved)
            }
            None => {
                MetricsCounters::bump(&self.metrics.no_matches);
                log::debug!("no case-insensitive match for {}", path.display());
                match repaired_parent {
                    Some(dir) => Cow::Owned(dir.join(filename)),
                    None => Cow::Borrowed(path),
                }
            }
        }
    }

    /// On-disk spelling of a missing `parent`, if one exists. Walks up as
    /// many levels as are mis-cased.
    fn repair_parent(&self, parent: &Path) -> Option<PathBuf> {
        if !self.is_candidate(parent) || self.fs().exists(parent) {
            return None;
        }
        match self.resolve_missing(parent) {
            Cow::Owned(repaired) if self.fs().exists(&repaired) => Some(repaired),
            _ => None,
        }
    }
}
