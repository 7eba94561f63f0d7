//! Compiled-bundle cache invalidation port
//!
//! Hosts that compile bundles cache the result; after an override update
//! the `"assets"` region must be invalidated before the operation returns
//! so other requests observe the new content. The cache is injected
//! explicitly rather than reached through ambient global state.

use std::sync::Mutex;

/// Cache region invalidated after override content changes.
pub const ASSETS_REGION: &str = "assets";

/// Invalidation hook for a named cache region.
pub trait AssetCache {
    fn invalidate(&self, region: &str);
}

impl<T: AssetCache> AssetCache for std::sync::Arc<T> {
    fn invalidate(&self, region: &str) {
        (**self).invalidate(region)
    }
}

/// Cache for callers without compiled-bundle state.
#[derive(Debug, Default)]
pub struct NoopCache;

impl AssetCache for NoopCache {
    fn invalidate(&self, _region: &str) {}
}

/// Records invalidations; used by tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingCache {
    invalidated: Mutex<Vec<String>>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidations(&self) -> Vec<String> {
        self.invalidated.lock().expect("cache lock poisoned").clone()
    }
}

impl AssetCache for RecordingCache {
    fn invalidate(&self, region: &str) {
        self.invalidated
            .lock()
            .expect("cache lock poisoned")
            .push(region.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_cache() {
        let cache = RecordingCache::new();
        cache.invalidate(ASSETS_REGION);
        cache.invalidate(ASSETS_REGION);
        assert_eq!(cache.invalidations(), vec!["assets", "assets"]);
    }
}
