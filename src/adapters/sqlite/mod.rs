//! SQLite-backed store adapter.

pub mod connection;
pub mod store;

pub use connection::{create_pool, ConnectionError, PoolConfig};
pub use store::{SqlRecord, SqliteQuery, SqliteStore};
