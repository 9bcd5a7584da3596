//! Readthrough - cache-aware repository layer
//!
//! Readthrough wraps a relational store with read-through caching and
//! write-triggered invalidation, driven by declarative per-type metadata
//! (table name, primary key, cache key, scope field).
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - **Domain Layer** (`domain`): entity contract, metadata, paging, errors,
//!   and the port traits the engine depends on
//! - **Repository Engine** (`repository`): the cache-aware read/write paths
//! - **Adapters** (`adapters`): moka-backed cache provider and a
//!   SQLite-backed store
//!
//! # Example
//!
//! ```ignore
//! use readthrough::{CachedRepository, MokaListCache, SqliteStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = readthrough::adapters::sqlite::create_pool("sqlite:app.db", None).await?;
//!     let repo = CachedRepository::new(SqliteStore::new(pool), MokaListCache::new());
//!     let widgets = repo.get_all().await?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod repository;

// Re-export commonly used types for convenience
pub use adapters::cache::{CacheSettings, MokaListCache};
pub use adapters::sqlite::{SqlRecord, SqliteStore};
pub use domain::entity::{Entity, Unscoped};
pub use domain::errors::{RepositoryError, RepositoryResult};
pub use domain::metadata::EntityMetadata;
pub use domain::paging::PagedList;
pub use domain::ports::{ListCache, Store};
pub use repository::CachedRepository;
