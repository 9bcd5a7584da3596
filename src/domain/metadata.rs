//! Per-type repository metadata.
//!
//! Each entity type registers one static [`EntityMetadata`] describing its
//! table, primary-key column, cacheability, and scope partitioning. The
//! builder is `const` so registrations are plain statics resolved at startup;
//! there is no runtime attribute inspection.

use std::fmt::Display;

/// Declarative metadata for one entity type.
///
/// Invariants are enforced by construction: a type that is not cacheable has
/// an empty cache key, and a type that is not scoped has an empty scope
/// field name. Metadata is immutable once built; the repository engine reads
/// it exactly once, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMetadata {
    table_name: &'static str,
    primary_key: &'static str,
    cacheable: bool,
    cache_key: &'static str,
    scoped: bool,
    scope: &'static str,
}

impl EntityMetadata {
    /// Start a registration: not cacheable, not scoped.
    pub const fn new(table_name: &'static str, primary_key: &'static str) -> Self {
        Self {
            table_name,
            primary_key,
            cacheable: false,
            cache_key: "",
            scoped: false,
            scope: "",
        }
    }

    /// Mark the type cacheable under `cache_key`.
    pub const fn cacheable(mut self, cache_key: &'static str) -> Self {
        self.cacheable = true;
        self.cache_key = cache_key;
        self
    }

    /// Mark the type scope-partitioned by the named field.
    pub const fn scoped(mut self, scope: &'static str) -> Self {
        self.scoped = true;
        self.scope = scope;
        self
    }

    /// Table backing this type.
    pub const fn table_name(&self) -> &'static str {
        self.table_name
    }

    /// Primary-key column name.
    pub const fn primary_key(&self) -> &'static str {
        self.primary_key
    }

    /// Whether reads are cached and writes invalidate.
    pub const fn is_cacheable(&self) -> bool {
        self.cacheable
    }

    /// Base cache key; empty when not cacheable.
    pub const fn cache_key(&self) -> &'static str {
        self.cache_key
    }

    /// Whether cache entries are partitioned by a scope field.
    pub const fn is_scoped(&self) -> bool {
        self.scoped
    }

    /// Scope field name; empty when not scoped.
    pub const fn scope(&self) -> &'static str {
        self.scope
    }

    /// Derive the cache key for one scope partition:
    /// `{cache_key}_{scope}_{scope_value}`.
    pub fn scoped_cache_key(&self, scope_value: &impl Display) -> String {
        format!("{}_{}_{}", self.cache_key, self.scope, scope_value)
    }
}
