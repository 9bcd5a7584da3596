//! Domain layer for the readthrough repository system
//!
//! This module contains the entity contract, per-type metadata, paging
//! primitives, errors, and the port traits the engine is generic over.

pub mod entity;
pub mod errors;
pub mod metadata;
pub mod paging;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{RepositoryError, RepositoryResult};
