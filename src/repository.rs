//! Cache-aware repository engine.
//!
//! [`CachedRepository`] wraps a [`Store`] with read-through caching and
//! write-triggered invalidation, keyed by the entity's static metadata.
//! Reads check the cache first (when the type is cacheable and the operation
//! applies), fall back to the store, and populate the cache; writes delegate
//! to the store and then remove the relevant cache entry.
//!
//! Each operation performs at most one cache read, one store call, and one
//! cache write, and spawns no concurrent work. A write removes the stale
//! entry; the next read misses and repopulates. Concurrent readers may race
//! to repopulate the same key after an invalidation; duplicate repopulation
//! is tolerated (last write to the cache wins) rather than serialized.

use std::marker::PhantomData;

use tracing::debug;

use crate::domain::entity::Entity;
use crate::domain::errors::{RepositoryError, RepositoryResult};
use crate::domain::metadata::EntityMetadata;
use crate::domain::paging::PagedList;
use crate::domain::ports::{ListCache, Store};

/// Repository over `T`, combining an injected store and cache provider.
///
/// Metadata is resolved once, here, and fixed for the instance's lifetime.
pub struct CachedRepository<T, S, C>
where
    T: Entity,
    S: Store<T>,
    C: ListCache<T>,
{
    store: S,
    cache: C,
    meta: &'static EntityMetadata,
    _entity: PhantomData<fn() -> T>,
}

impl<T, S, C> CachedRepository<T, S, C>
where
    T: Entity,
    S: Store<T>,
    C: ListCache<T>,
{
    /// Build a repository from its collaborators, resolving `T`'s metadata.
    pub fn new(store: S, cache: C) -> Self {
        Self {
            store,
            cache,
            meta: T::metadata(),
            _entity: PhantomData,
        }
    }

    /// The metadata this repository was constructed with.
    pub const fn metadata(&self) -> &'static EntityMetadata {
        self.meta
    }

    /// Insert a record, then invalidate its cache entry.
    pub async fn add(&self, item: &T) -> RepositoryResult<()> {
        self.store.add(item).await?;
        self.invalidate(item).await;
        Ok(())
    }

    /// Delete a record, then invalidate its cache entry.
    pub async fn delete(&self, item: &T) -> RepositoryResult<()> {
        self.store.delete(item).await?;
        self.invalidate(item).await;
        Ok(())
    }

    /// Update a record, then invalidate its cache entry.
    pub async fn update(&self, item: &T) -> RepositoryResult<()> {
        self.store.update(item).await?;
        self.invalidate(item).await;
        Ok(())
    }

    /// Fetch every record, read-through when the type is cacheable and
    /// unscoped.
    pub async fn get_all(&self) -> RepositoryResult<Vec<T>> {
        if !(self.meta.is_cacheable() && !self.meta.is_scoped()) {
            return self.store.get_all().await;
        }

        let key = self.meta.cache_key();
        if let Some(hit) = self.cache.get(key).await {
            debug!(key = %key, "cache hit");
            return Ok(hit);
        }

        debug!(key = %key, "cache miss, fetching from store");
        let items = self.store.get_all().await?;
        self.cache.insert(key, items.clone()).await;
        Ok(items)
    }

    /// Fetch every record in one scope partition, read-through.
    ///
    /// Requires the type to be both cacheable and scoped.
    pub async fn get_scoped(&self, scope: &T::Scope) -> RepositoryResult<Vec<T>> {
        self.require_scoped("get_scoped")?;

        let key = self.meta.scoped_cache_key(scope);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(key = %key, "cache hit");
            return Ok(hit);
        }

        debug!(key = %key, "cache miss, fetching from store");
        let items = self.store.get_by_scope(scope).await?;
        self.cache.insert(&key, items.clone()).await;
        Ok(items)
    }

    /// Fetch one record by primary key.
    ///
    /// When the type is cacheable and unscoped, a cached full list is
    /// scanned in memory and the store is never called, even when the scan
    /// finds nothing. A miss goes straight to the store without populating
    /// the cache.
    pub async fn get_by_id(&self, id: &T::Key) -> RepositoryResult<Option<T>> {
        if self.meta.is_cacheable() && !self.meta.is_scoped() {
            if let Some(hit) = self.cache.get(self.meta.cache_key()).await {
                debug!(key = self.meta.cache_key(), "cache hit, scanning list");
                return Ok(hit.into_iter().find(|item| item.key() == *id));
            }
        }

        self.store.get_by_id(id).await
    }

    /// Fetch one record by primary key within a scope partition.
    ///
    /// Requires the type to be both cacheable and scoped. A scoped-key hit
    /// is scanned in memory; a miss goes straight to the store.
    pub async fn get_by_id_scoped(
        &self,
        id: &T::Key,
        scope: &T::Scope,
    ) -> RepositoryResult<Option<T>> {
        self.require_scoped("get_by_id_scoped")?;

        let key = self.meta.scoped_cache_key(scope);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(key = %key, "cache hit, scanning list");
            return Ok(hit.into_iter().find(|item| item.key() == *id));
        }

        self.store.get_by_id(id).await
    }

    /// Fetch one page of records.
    ///
    /// When the type is cacheable and unscoped and the cache holds the full
    /// list (even an empty one), the page is sliced locally; otherwise the
    /// store pages. Page reads never populate the cache.
    pub async fn get_page(
        &self,
        page_index: usize,
        page_size: usize,
    ) -> RepositoryResult<PagedList<T>> {
        if self.meta.is_cacheable() && !self.meta.is_scoped() {
            if let Some(hit) = self.cache.get(self.meta.cache_key()).await {
                debug!(key = self.meta.cache_key(), "cache hit, slicing page");
                return Ok(PagedList::from_full(hit, page_index, page_size));
            }
        }

        self.store.get_page(page_index, page_size).await
    }

    /// Fetch one page of records within a scope partition.
    ///
    /// Requires the type to be both cacheable and scoped.
    pub async fn get_page_scoped(
        &self,
        scope: &T::Scope,
        page_index: usize,
        page_size: usize,
    ) -> RepositoryResult<PagedList<T>> {
        self.require_scoped("get_page_scoped")?;

        let key = self.meta.scoped_cache_key(scope);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(key = %key, "cache hit, slicing page");
            return Ok(PagedList::from_full(hit, page_index, page_size));
        }

        self.store.get_page_by_scope(scope, page_index, page_size).await
    }

    /// Hard precondition for scope-requiring operations: the type must be
    /// both cacheable and scoped, checked before any cache or store access.
    fn require_scoped(&self, operation: &'static str) -> RepositoryResult<()> {
        if self.meta.is_cacheable() && self.meta.is_scoped() {
            Ok(())
        } else {
            Err(RepositoryError::UnsupportedOperation { operation })
        }
    }

    /// Remove the cache entry a successful write made stale.
    ///
    /// Scoped types invalidate only the partition the mutated record
    /// belongs to, derived from its scope field.
    async fn invalidate(&self, item: &T) {
        if !self.meta.is_cacheable() {
            return;
        }

        let key = if self.meta.is_scoped() {
            self.meta.scoped_cache_key(&item.scope())
        } else {
            self.meta.cache_key().to_string()
        };

        debug!(key = %key, "invalidating after write");
        self.cache.remove(&key).await;
    }
}
