//! Store port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entity::Entity;
use crate::domain::errors::RepositoryResult;
use crate::domain::paging::PagedList;

/// Persistence operations for one entity type.
///
/// Implementations talk to durable storage; the engine layers caching on
/// top and propagates store failures unchanged, with no retry or
/// translation. A store that has not wired an operation yet returns
/// [`RepositoryError::NotImplemented`](crate::RepositoryError::NotImplemented).
#[async_trait]
pub trait Store<T: Entity>: Send + Sync {
    /// Insert a new record.
    async fn add(&self, item: &T) -> RepositoryResult<()>;

    /// Delete a record.
    async fn delete(&self, item: &T) -> RepositoryResult<()>;

    /// Update an existing record.
    async fn update(&self, item: &T) -> RepositoryResult<()>;

    /// Fetch every record, in stable order.
    async fn get_all(&self) -> RepositoryResult<Vec<T>>;

    /// Fetch one record by primary key.
    async fn get_by_id(&self, id: &T::Key) -> RepositoryResult<Option<T>>;

    /// Fetch every record in one scope partition.
    async fn get_by_scope(&self, scope: &T::Scope) -> RepositoryResult<Vec<T>>;

    /// Fetch one page of records.
    async fn get_page(&self, page_index: usize, page_size: usize)
        -> RepositoryResult<PagedList<T>>;

    /// Fetch one page of records within a scope partition.
    async fn get_page_by_scope(
        &self,
        scope: &T::Scope,
        page_index: usize,
        page_size: usize,
    ) -> RepositoryResult<PagedList<T>>;
}

#[async_trait]
impl<T, S> Store<T> for Arc<S>
where
    T: Entity,
    S: Store<T> + ?Sized,
{
    async fn add(&self, item: &T) -> RepositoryResult<()> {
        (**self).add(item).await
    }

    async fn delete(&self, item: &T) -> RepositoryResult<()> {
        (**self).delete(item).await
    }

    async fn update(&self, item: &T) -> RepositoryResult<()> {
        (**self).update(item).await
    }

    async fn get_all(&self) -> RepositoryResult<Vec<T>> {
        (**self).get_all().await
    }

    async fn get_by_id(&self, id: &T::Key) -> RepositoryResult<Option<T>> {
        (**self).get_by_id(id).await
    }

    async fn get_by_scope(&self, scope: &T::Scope) -> RepositoryResult<Vec<T>> {
        (**self).get_by_scope(scope).await
    }

    async fn get_page(
        &self,
        page_index: usize,
        page_size: usize,
    ) -> RepositoryResult<PagedList<T>> {
        (**self).get_page(page_index, page_size).await
    }

    async fn get_page_by_scope(
        &self,
        scope: &T::Scope,
        page_index: usize,
        page_size: usize,
    ) -> RepositoryResult<PagedList<T>> {
        (**self).get_page_by_scope(scope, page_index, page_size).await
    }
}
