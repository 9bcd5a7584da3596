//! Entity contract.
//!
//! The engine never inspects record fields structurally; it reaches them
//! through the explicit accessors declared here, resolved at registration
//! time rather than via runtime introspection.

use std::fmt;

use crate::domain::metadata::EntityMetadata;

/// A record type managed by a repository.
///
/// `Key` and `Scope` are independent type parameters: a record may be keyed
/// by an integer while being scoped by a string tenant id. Types that are
/// not scope-partitioned use [`Unscoped`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Primary-key value type.
    type Key: PartialEq + Clone + Send + Sync + 'static;

    /// Scope value type; its `Display` form feeds cache-key derivation.
    type Scope: fmt::Display + Clone + Send + Sync + 'static;

    /// The static registration for this type, resolved once per repository.
    fn metadata() -> &'static EntityMetadata;

    /// Value of the primary-key field.
    fn key(&self) -> Self::Key;

    /// Value of the scope field.
    ///
    /// Only consulted when the metadata says the type is scoped.
    fn scope(&self) -> Self::Scope;
}

/// Scope placeholder for types without a scope field.
///
/// Displays as the empty string, matching the "no scope" metadata default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unscoped;

impl fmt::Display for Unscoped {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}
