//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the async trait interfaces the repository engine is
//! generic over:
//! - `Store`: persistence operations for one entity type
//! - `ListCache`: key-value cache of full record lists
//!
//! These traits keep the engine independent of any specific storage or
//! caching implementation.

pub mod cache;
pub mod store;

pub use cache::ListCache;
pub use store::Store;
