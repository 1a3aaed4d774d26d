//! Bounded account -> parent cache with LRU eviction and TTL.

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use ou_membership_client::Parent;
use tracing::{debug, trace};

/// Default maximum number of account -> parent mappings to cache.
pub const DEFAULT_MAX_ENTRIES: usize = 512;

/// Default time-to-live for cached mappings.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Configuration for the parent cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum entries before LRU eviction.
    pub max_entries: usize,

    /// How long a cached mapping stays valid, measured from insertion.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl: DEFAULT_TTL,
        }
    }
}

impl CacheConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of entries to cache.
    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    /// Set the TTL for cached entries.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Entry stored in the cache.
#[derive(Debug, Clone)]
struct CacheEntry {
    parent: Parent,

    /// When this mapping was inserted. TTL is measured from here, not from
    /// last access.
    cached_at: Instant,
}

/// Account -> parent cache.
///
/// Entries expire on read once older than the TTL and are evicted
/// least-recently-used at capacity. The org tree is assumed stable for the
/// cache's lifetime; nothing else invalidates an entry.
#[derive(Debug)]
pub struct ParentCache {
    lru: LruCache<String, CacheEntry>,
    ttl: Duration,
}

impl ParentCache {
    pub fn new(config: &CacheConfig) -> Self {
        let cap =
            NonZeroUsize::new(config.max_entries).unwrap_or_else(|| NonZeroUsize::new(1).unwrap());

        Self {
            lru: LruCache::new(cap),
            ttl: config.ttl,
        }
    }

    /// Look up the cached parent of `account_id`.
    ///
    /// Entries past the TTL are dropped and reported as misses. A hit marks
    /// the entry as recently used.
    pub fn get(&mut self, account_id: &str) -> Option<Parent> {
        let expired = match self.lru.get(account_id) {
            Some(entry) if entry.cached_at.elapsed() <= self.ttl => {
                trace!(account_id = %account_id, "Parent cache hit");
                return Some(entry.parent.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            debug!(account_id = %account_id, "Parent cache entry expired, removing");
            self.lru.pop(account_id);
        }
        None
    }

    /// Insert a mapping, evicting the least-recently-used entry at capacity.
    pub fn insert(&mut self, account_id: &str, parent: Parent) {
        self.lru.put(
            account_id.to_string(),
            CacheEntry {
                parent,
                cached_at: Instant::now(),
            },
        );
        trace!(
            account_id = %account_id,
            cache_size = self.lru.len(),
            "Parent cached"
        );
    }

    /// Current number of cached mappings (expired entries included until
    /// read).
    pub fn len(&self) -> usize {
        self.lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lru.is_empty()
    }

    /// Cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.lru.len(),
            capacity: self.lru.cap().get(),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Current number of cached mappings.
    pub size: usize,

    /// Maximum capacity.
    pub capacity: usize,
}

#[cfg(test)]
mod tests {
    use std::thread;

    use ou_membership_client::ParentKind;

    use super::*;

    fn ou(id: &str) -> Parent {
        Parent {
            id: id.to_string(),
            kind: ParentKind::OrganizationalUnit,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = ParentCache::new(&CacheConfig::default());

        cache.insert("account-1", ou("ou-parent"));

        let parent = cache.get("account-1").unwrap();
        assert_eq!(parent.id, "ou-parent");
        assert!(cache.get("account-2").is_none());
    }

    #[test]
    fn test_lru_eviction_at_capacity() {
        let config = CacheConfig::new().with_max_entries(2);
        let mut cache = ParentCache::new(&config);

        cache.insert("account-1", ou("ou-a"));
        cache.insert("account-2", ou("ou-b"));
        cache.insert("account-3", ou("ou-c"));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("account-1").is_none());
        assert!(cache.get("account-2").is_some());
        assert!(cache.get("account-3").is_some());
    }

    #[test]
    fn test_access_updates_lru_order() {
        let config = CacheConfig::new().with_max_entries(2);
        let mut cache = ParentCache::new(&config);

        cache.insert("account-1", ou("ou-a"));
        cache.insert("account-2", ou("ou-b"));

        // Touch account-1 so account-2 becomes the eviction candidate.
        cache.get("account-1");
        cache.insert("account-3", ou("ou-c"));

        assert!(cache.get("account-1").is_some());
        assert!(cache.get("account-2").is_none());
        assert!(cache.get("account-3").is_some());
    }

    #[test]
    fn test_ttl_expiry_is_a_miss() {
        let config = CacheConfig::new().with_ttl(Duration::from_millis(20));
        let mut cache = ParentCache::new(&config);

        cache.insert("account-1", ou("ou-a"));
        assert!(cache.get("account-1").is_some());

        thread::sleep(Duration::from_millis(40));

        assert!(cache.get("account-1").is_none());
        // The expired entry is dropped, not just hidden.
        assert!(cache.is_empty());
    }

    #[test]
    fn test_reads_do_not_extend_ttl() {
        let config = CacheConfig::new().with_ttl(Duration::from_millis(50));
        let mut cache = ParentCache::new(&config);

        cache.insert("account-1", ou("ou-a"));

        thread::sleep(Duration::from_millis(30));
        assert!(cache.get("account-1").is_some());

        // TTL runs from insertion; the read above must not have reset it.
        thread::sleep(Duration::from_millis(30));
        assert!(cache.get("account-1").is_none());
    }

    #[test]
    fn test_zero_capacity_clamps_to_one() {
        let config = CacheConfig::new().with_max_entries(0);
        let mut cache = ParentCache::new(&config);

        cache.insert("account-1", ou("ou-a"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_stats() {
        let config = CacheConfig::new().with_max_entries(16);
        let mut cache = ParentCache::new(&config);

        cache.insert("account-1", ou("ou-a"));
        cache.insert("account-2", ou("ou-b"));

        let stats = cache.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.capacity, 16);
    }
}
