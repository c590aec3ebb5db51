//! The process-wide resolver.
//!
//! [`resolver`] is the only way the process-wide [`PathResolver`] is built:
//! on first use it reads [`Config`] from the environment, installs logging,
//! binds the real filesystem primitives and owns the resulting cache until
//! the process exits.

use std::cell::Cell;
use std::sync::OnceLock;

use crate::config::Config;
use crate::logging;
use crate::posix::RealFs;
use crate::resolution::PathResolver;

static CONFIG: OnceLock<Config> = OnceLock::new();
static RESOLVER: OnceLock<Option<PathResolver<RealFs>>> = OnceLock::new();

thread_local! {
    static IN_RESOLVER: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as busy resolving. Intercepted calls made while
/// a guard is alive must bypass the resolver.
pub struct ReentryGuard(());

impl ReentryGuard {
    /// `None` if this thread already holds a guard, or if thread-local
    /// storage is gone (thread teardown).
    pub fn enter() -> Option<Self> {
        IN_RESOLVER
            .try_with(|busy| (!busy.replace(true)).then(|| ReentryGuard(())))
            .ok()
            .flatten()
    }
}

impl Drop for ReentryGuard {
    fn drop(&mut self) {
        let _ = IN_RESOLVER.try_with(|busy| busy.set(false));
    }
}

/// Configuration read once from the environment. Logging is installed as
/// part of the first call.
pub fn config() -> &'static Config {
    CONFIG.get_or_init(|| {
        let (config, problems) = Config::from_env();
        logging::install(&config);
        for problem in problems {
            log::warn!("{problem}; using the default");
        }
        config
    })
}

/// The process resolver, or `None` when resolution is disabled or the real
/// primitives could not be bound. Callers should hold a [`ReentryGuard`].
pub fn resolver() -> Option<&'static PathResolver<RealFs>> {
    RESOLVER.get_or_init(build_resolver).as_ref()
}

fn build_resolver() -> Option<PathResolver<RealFs>> {
    let config = config();
    #[cfg(feature = "preload")]
    crate::posix::preload::report_missing();

    if !config.enabled {
        log::info!("case-insensitive resolution disabled; passing all paths through");
        return None;
    }
    match RealFs::bind() {
        Ok(fs) => {
            log::debug!(
                "case-insensitive resolution enabled; excluded prefixes {:?}",
                config.exclusions
            );
            Some(PathResolver::new(fs, config.exclusion_filter()))
        }
        Err(err) => {
            log::error!("{err}; passing all paths through");
            None
        }
    }
}
