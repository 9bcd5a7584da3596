//! SQLite implementation of the Store port.
//!
//! SQL is derived from the entity's registered metadata (table name,
//! primary-key column, scope column). Row mapping and value binding stay
//! explicit per type through [`SqlRecord`], rather than being recovered by
//! reflection.

use std::fmt::Display;
use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Sqlite, SqlitePool};

use crate::domain::entity::Entity;
use crate::domain::errors::{RepositoryError, RepositoryResult};
use crate::domain::metadata::EntityMetadata;
use crate::domain::paging::PagedList;
use crate::domain::ports::Store;

/// A plain `sqlx` query against SQLite, as passed to the bind hooks.
pub type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// SQL mapping for one entity type.
///
/// Implementors list their columns and bind their values; everything else
/// (statement shape, paging, key lookups) comes from the metadata. Bind
/// owned values in the hooks so the query does not borrow the record.
pub trait SqlRecord: Entity + for<'r> sqlx::FromRow<'r, SqliteRow> + Unpin {
    /// All column names, primary key included, in bind order.
    const COLUMNS: &'static [&'static str];

    /// Bind this record's values in [`Self::COLUMNS`] order.
    fn bind_insert<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;

    /// Bind the non-primary-key values in [`Self::COLUMNS`] order, then the
    /// primary key last (for the `WHERE` clause).
    fn bind_update<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}

/// [`Store`] implementation over a `sqlx` SQLite pool.
#[derive(Clone)]
pub struct SqliteStore<T> {
    pool: SqlitePool,
    meta: &'static EntityMetadata,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> SqliteStore<T> {
    /// Create a store over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            meta: T::metadata(),
            _entity: PhantomData,
        }
    }

    fn require_scope_column(&self, operation: &'static str) -> RepositoryResult<&'static str> {
        if self.meta.is_scoped() {
            Ok(self.meta.scope())
        } else {
            Err(RepositoryError::UnsupportedOperation { operation })
        }
    }
}

#[async_trait]
impl<T> Store<T> for SqliteStore<T>
where
    T: SqlRecord,
    T::Key: Display,
{
    async fn add(&self, item: &T) -> RepositoryResult<()> {
        let columns = T::COLUMNS.join(", ");
        let placeholders = vec!["?"; T::COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({columns}) VALUES ({placeholders})",
            self.meta.table_name()
        );

        item.bind_insert(sqlx::query(&sql))
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        Ok(())
    }

    async fn delete(&self, item: &T) -> RepositoryResult<()> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            self.meta.table_name(),
            self.meta.primary_key()
        );

        sqlx::query(&sql)
            .bind(item.key().to_string())
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        Ok(())
    }

    async fn update(&self, item: &T) -> RepositoryResult<()> {
        let assignments = T::COLUMNS
            .iter()
            .filter(|column| **column != self.meta.primary_key())
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE {} = ?",
            self.meta.table_name(),
            self.meta.primary_key()
        );

        item.bind_update(sqlx::query(&sql))
            .execute(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        Ok(())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<T>> {
        let sql = format!(
            "SELECT * FROM {} ORDER BY {}",
            self.meta.table_name(),
            self.meta.primary_key()
        );

        sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }

    async fn get_by_id(&self, id: &T::Key) -> RepositoryResult<Option<T>> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = ?",
            self.meta.table_name(),
            self.meta.primary_key()
        );

        sqlx::query_as(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }

    async fn get_by_scope(&self, scope: &T::Scope) -> RepositoryResult<Vec<T>> {
        let scope_column = self.require_scope_column("get_by_scope")?;
        let sql = format!(
            "SELECT * FROM {} WHERE {scope_column} = ? ORDER BY {}",
            self.meta.table_name(),
            self.meta.primary_key()
        );

        sqlx::query_as(&sql)
            .bind(scope.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from)
    }

    async fn get_page(
        &self,
        page_index: usize,
        page_size: usize,
    ) -> RepositoryResult<PagedList<T>> {
        let count_sql = format!("SELECT COUNT(*) FROM {}", self.meta.table_name());
        let total: i64 = sqlx::query_scalar(&count_sql)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        let sql = format!(
            "SELECT * FROM {} ORDER BY {} LIMIT ? OFFSET ?",
            self.meta.table_name(),
            self.meta.primary_key()
        );
        let items = sqlx::query_as(&sql)
            .bind(page_size as i64)
            .bind((page_index * page_size) as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        Ok(PagedList::new(
            items,
            usize::try_from(total).unwrap_or_default(),
            page_index,
            page_size,
        ))
    }

    async fn get_page_by_scope(
        &self,
        scope: &T::Scope,
        page_index: usize,
        page_size: usize,
    ) -> RepositoryResult<PagedList<T>> {
        let scope_column = self.require_scope_column("get_page_by_scope")?;

        let count_sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {scope_column} = ?",
            self.meta.table_name()
        );
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(scope.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        let sql = format!(
            "SELECT * FROM {} WHERE {scope_column} = ? ORDER BY {} LIMIT ? OFFSET ?",
            self.meta.table_name(),
            self.meta.primary_key()
        );
        let items = sqlx::query_as(&sql)
            .bind(scope.to_string())
            .bind(page_size as i64)
            .bind((page_index * page_size) as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        Ok(PagedList::new(
            items,
            usize::try_from(total).unwrap_or_default(),
            page_index,
            page_size,
        ))
    }
}
