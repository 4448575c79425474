use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

/// Session-scoped record of image URLs that finished loading
///
/// Cloning yields another handle to the same cache. Entries are never evicted; the
/// cache lives as long as the session that created it. Tests construct their own
/// instance, so no state leaks between them.
#[derive(Clone, Default)]
pub struct ImageCache {
    loaded: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.loaded
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(url)
    }

    /// When the URL first finished loading, if it has
    pub fn loaded_at(&self, url: &str) -> Option<DateTime<Utc>> {
        self.loaded
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .copied()
    }

    /// Records a successful load; the first timestamp wins
    pub fn mark_loaded(&self, url: &str) {
        let mut loaded = self.loaded.write().unwrap_or_else(PoisonError::into_inner);
        if !loaded.contains_key(url) {
            loaded.insert(url.to_string(), Utc::now());
            tracing::trace!(url = %url, cached = loaded.len(), "Image cached");
        }
    }

    pub fn len(&self) -> usize {
        self.loaded.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.loaded
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_contains() {
        let cache = ImageCache::new();
        assert!(!cache.contains("https://img.local/dune.jpg"));

        cache.mark_loaded("https://img.local/dune.jpg");
        assert!(cache.contains("https://img.local/dune.jpg"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_first_load_time_is_kept() {
        let cache = ImageCache::new();
        cache.mark_loaded("a");
        let first = cache.loaded_at("a").unwrap();
        cache.mark_loaded("a");
        assert_eq!(cache.loaded_at("a"), Some(first));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = ImageCache::new();
        let other = cache.clone();
        other.mark_loaded("a");
        assert!(cache.contains("a"));
    }

    #[test]
    fn test_separate_instances_are_isolated() {
        let first = ImageCache::new();
        let second = ImageCache::new();
        first.mark_loaded("a");
        assert!(second.is_empty());
    }

    #[test]
    fn test_clear() {
        let cache = ImageCache::new();
        cache.mark_loaded("a");
        cache.clear();
        assert!(cache.is_empty());
    }
}
