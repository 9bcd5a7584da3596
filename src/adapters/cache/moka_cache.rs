//! Moka-backed cache provider.
//!
//! Stores full record lists behind a bounded, TTL-evicting moka cache. The
//! repository engine imposes no TTL semantics of its own; expiry here just
//! turns stale entries into ordinary misses.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use serde::Deserialize;

use crate::domain::ports::ListCache;

/// Default TTL for cached record lists.
const LIST_CACHE_TTL_SECS: u64 = 60;

/// Maximum number of cached list entries.
const LIST_CACHE_MAX_CAPACITY: u64 = 1024;

/// Tunables for [`MokaListCache`], deserializable from application config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Entry time-to-live, in seconds.
    pub ttl_secs: u64,
    /// Maximum number of entries.
    pub max_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: LIST_CACHE_TTL_SECS,
            max_capacity: LIST_CACHE_MAX_CAPACITY,
        }
    }
}

/// [`ListCache`] implementation over `moka::future::Cache`.
///
/// Entries are `Arc`-wrapped so a get clones the list, not the cache slot.
/// Safe for concurrent use by multiple repository instances.
pub struct MokaListCache<T> {
    inner: Cache<String, Arc<Vec<T>>>,
}

impl<T> MokaListCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a cache with the default TTL and capacity.
    pub fn new() -> Self {
        Self::with_settings(&CacheSettings::default())
    }

    /// Create a cache from explicit settings.
    pub fn with_settings(settings: &CacheSettings) -> Self {
        let inner = Cache::builder()
            .max_capacity(settings.max_capacity)
            .time_to_live(Duration::from_secs(settings.ttl_secs))
            .build();

        Self { inner }
    }

    /// Create a cache with a custom TTL and the default capacity.
    pub fn with_ttl(ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(LIST_CACHE_MAX_CAPACITY)
            .time_to_live(ttl)
            .build();

        Self { inner }
    }
}

impl<T> Default for MokaListCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> ListCache<T> for MokaListCache<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> Option<Vec<T>> {
        self.inner.get(key).await.map(|list| (*list).clone())
    }

    async fn insert(&self, key: &str, items: Vec<T>) {
        self.inner.insert(key.to_string(), Arc::new(items)).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}
