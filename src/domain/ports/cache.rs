//! Cache provider port.

use std::sync::Arc;

use async_trait::async_trait;

/// Key-value cache of full record lists.
///
/// A cached entry is always the complete unfiltered list for its key, never
/// a partial result. `Some(vec![])` is a hit and short-circuits store calls;
/// only `None` is a miss. Entries are removed on invalidation, never updated
/// in place. Eviction and TTL are the implementation's own business.
///
/// Implementations must be safe for concurrent use by multiple repository
/// instances; the engine performs no locking around them.
#[async_trait]
pub trait ListCache<T>: Send + Sync {
    /// Look up the list cached under `key`.
    async fn get(&self, key: &str) -> Option<Vec<T>>;

    /// Cache `items` as the full list for `key`, replacing any entry.
    async fn insert(&self, key: &str, items: Vec<T>);

    /// Drop the entry for `key`, if any.
    async fn remove(&self, key: &str);
}

#[async_trait]
impl<T, C> ListCache<T> for Arc<C>
where
    T: Send + Sync + 'static,
    C: ListCache<T> + ?Sized,
{
    async fn get(&self, key: &str) -> Option<Vec<T>> {
        (**self).get(key).await
    }

    async fn insert(&self, key: &str, items: Vec<T>) {
        (**self).insert(key, items).await;
    }

    async fn remove(&self, key: &str) {
        (**self).remove(key).await;
    }
}
