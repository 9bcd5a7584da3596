//! Common test utilities for integration tests
//!
//! Provides the fixture entity types (spanning every metadata combination)
//! and call-counting fakes for the store and cache ports.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use readthrough::{
    Entity, EntityMetadata, ListCache, PagedList, RepositoryError, RepositoryResult, Store,
    Unscoped,
};

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

// ---------------------------------------------------------------------------
// Fixture entities: one per metadata combination.
// ---------------------------------------------------------------------------

/// Not cacheable, not scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dog {
    pub id: i64,
    pub name: String,
}

static DOG_META: EntityMetadata = EntityMetadata::new("dogs", "id");

impl Entity for Dog {
    type Key = i64;
    type Scope = Unscoped;

    fn metadata() -> &'static EntityMetadata {
        &DOG_META
    }

    fn key(&self) -> i64 {
        self.id
    }

    fn scope(&self) -> Unscoped {
        Unscoped
    }
}

/// Cacheable, not scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheableDog {
    pub id: i64,
    pub name: String,
}

pub const DOGS_CACHE_KEY: &str = "readthrough_dogs";

static CACHEABLE_DOG_META: EntityMetadata =
    EntityMetadata::new("dogs", "id").cacheable(DOGS_CACHE_KEY);

impl Entity for CacheableDog {
    type Key = i64;
    type Scope = Unscoped;

    fn metadata() -> &'static EntityMetadata {
        &CACHEABLE_DOG_META
    }

    fn key(&self) -> i64 {
        self.id
    }

    fn scope(&self) -> Unscoped {
        Unscoped
    }
}

/// Scoped but not cacheable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cat {
    pub id: i64,
    pub module_id: i64,
}

static CAT_META: EntityMetadata = EntityMetadata::new("cats", "id").scoped("module_id");

impl Entity for Cat {
    type Key = i64;
    type Scope = i64;

    fn metadata() -> &'static EntityMetadata {
        &CAT_META
    }

    fn key(&self) -> i64 {
        self.id
    }

    fn scope(&self) -> i64 {
        self.module_id
    }
}

/// Cacheable and scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheableCat {
    pub id: i64,
    pub module_id: i64,
    pub name: String,
}

pub const CATS_CACHE_KEY: &str = "readthrough_cats";

static CACHEABLE_CAT_META: EntityMetadata = EntityMetadata::new("cats", "id")
    .cacheable(CATS_CACHE_KEY)
    .scoped("module_id");

impl Entity for CacheableCat {
    type Key = i64;
    type Scope = i64;

    fn metadata() -> &'static EntityMetadata {
        &CACHEABLE_CAT_META
    }

    fn key(&self) -> i64 {
        self.id
    }

    fn scope(&self) -> i64 {
        self.module_id
    }
}

/// Cacheable and scoped by a string tenant id, with an integer key.
/// Exercises the key and scope types being independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantNote {
    pub id: i64,
    pub tenant: String,
    pub body: String,
}

pub const NOTES_CACHE_KEY: &str = "readthrough_notes";

static TENANT_NOTE_META: EntityMetadata = EntityMetadata::new("notes", "id")
    .cacheable(NOTES_CACHE_KEY)
    .scoped("tenant");

impl Entity for TenantNote {
    type Key = i64;
    type Scope = String;

    fn metadata() -> &'static EntityMetadata {
        &TENANT_NOTE_META
    }

    fn key(&self) -> i64 {
        self.id
    }

    fn scope(&self) -> String {
        self.tenant.clone()
    }
}

// ---------------------------------------------------------------------------
// Counting fakes. Tests hold an `Arc` handle and hand a clone to the engine.
// ---------------------------------------------------------------------------

/// In-memory `ListCache` that counts every port call.
pub struct RecordingCache<T> {
    entries: Mutex<HashMap<String, Vec<T>>>,
    gets: AtomicUsize,
    inserts: AtomicUsize,
    removes: AtomicUsize,
    removed_keys: Mutex<Vec<String>>,
}

impl<T> RecordingCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            gets: AtomicUsize::new(0),
            inserts: AtomicUsize::new(0),
            removes: AtomicUsize::new(0),
            removed_keys: Mutex::new(Vec::new()),
        }
    }

    /// Pre-populate an entry without touching the call counters.
    pub fn prime(&self, key: &str, items: Vec<T>) {
        self.entries.lock().unwrap().insert(key.to_string(), items);
    }

    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn remove_calls(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    pub fn removed_keys(&self) -> Vec<String> {
        self.removed_keys.lock().unwrap().clone()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> ListCache<T> for RecordingCache<T> {
    async fn get(&self, key: &str) -> Option<Vec<T>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().get(key).cloned()
    }

    async fn insert(&self, key: &str, items: Vec<T>) {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().insert(key.to_string(), items);
    }

    async fn remove(&self, key: &str) {
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.removed_keys.lock().unwrap().push(key.to_string());
        self.entries.lock().unwrap().remove(key);
    }
}

/// In-memory `Store` that counts every port call.
pub struct RecordingStore<T> {
    items: Mutex<Vec<T>>,
    adds: AtomicUsize,
    deletes: AtomicUsize,
    updates: AtomicUsize,
    get_alls: AtomicUsize,
    get_by_ids: AtomicUsize,
    get_by_scopes: AtomicUsize,
    get_pages: AtomicUsize,
    get_pages_by_scope: AtomicUsize,
}

impl<T: Entity> RecordingStore<T> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: Mutex::new(items),
            adds: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
            get_alls: AtomicUsize::new(0),
            get_by_ids: AtomicUsize::new(0),
            get_by_scopes: AtomicUsize::new(0),
            get_pages: AtomicUsize::new(0),
            get_pages_by_scope: AtomicUsize::new(0),
        }
    }

    pub fn add_calls(&self) -> usize {
        self.adds.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn get_all_calls(&self) -> usize {
        self.get_alls.load(Ordering::SeqCst)
    }

    pub fn get_by_id_calls(&self) -> usize {
        self.get_by_ids.load(Ordering::SeqCst)
    }

    pub fn get_by_scope_calls(&self) -> usize {
        self.get_by_scopes.load(Ordering::SeqCst)
    }

    pub fn get_page_calls(&self) -> usize {
        self.get_pages.load(Ordering::SeqCst)
    }

    pub fn get_page_by_scope_calls(&self) -> usize {
        self.get_pages_by_scope.load(Ordering::SeqCst)
    }

    /// Total count across every port method.
    pub fn total_calls(&self) -> usize {
        self.add_calls()
            + self.delete_calls()
            + self.update_calls()
            + self.get_all_calls()
            + self.get_by_id_calls()
            + self.get_by_scope_calls()
            + self.get_page_calls()
            + self.get_page_by_scope_calls()
    }
}

#[async_trait]
impl<T: Entity> Store<T> for RecordingStore<T> {
    async fn add(&self, item: &T) -> RepositoryResult<()> {
        self.adds.fetch_add(1, Ordering::SeqCst);
        self.items.lock().unwrap().push(item.clone());
        Ok(())
    }

    async fn delete(&self, item: &T) -> RepositoryResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.items.lock().unwrap().retain(|i| i.key() != item.key());
        Ok(())
    }

    async fn update(&self, item: &T) -> RepositoryResult<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut items = self.items.lock().unwrap();
        if let Some(existing) = items.iter_mut().find(|i| i.key() == item.key()) {
            *existing = item.clone();
        }
        Ok(())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<T>> {
        self.get_alls.fetch_add(1, Ordering::SeqCst);
        Ok(self.items.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: &T::Key) -> RepositoryResult<Option<T>> {
        self.get_by_ids.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.key() == *id)
            .cloned())
    }

    async fn get_by_scope(&self, scope: &T::Scope) -> RepositoryResult<Vec<T>> {
        self.get_by_scopes.fetch_add(1, Ordering::SeqCst);
        let scope = scope.to_string();
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.scope().to_string() == scope)
            .cloned()
            .collect())
    }

    async fn get_page(
        &self,
        page_index: usize,
        page_size: usize,
    ) -> RepositoryResult<PagedList<T>> {
        self.get_pages.fetch_add(1, Ordering::SeqCst);
        let items = self.items.lock().unwrap().clone();
        Ok(PagedList::from_full(items, page_index, page_size))
    }

    async fn get_page_by_scope(
        &self,
        scope: &T::Scope,
        page_index: usize,
        page_size: usize,
    ) -> RepositoryResult<PagedList<T>> {
        self.get_pages_by_scope.fetch_add(1, Ordering::SeqCst);
        let scope = scope.to_string();
        let items = self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.scope().to_string() == scope)
            .cloned()
            .collect();
        Ok(PagedList::from_full(items, page_index, page_size))
    }
}

/// Store whose every operation fails, for error-propagation tests.
pub struct FailingStore;

#[async_trait]
impl<T: Entity> Store<T> for FailingStore {
    async fn add(&self, _item: &T) -> RepositoryResult<()> {
        Err(RepositoryError::Database("connection lost".into()))
    }

    async fn delete(&self, _item: &T) -> RepositoryResult<()> {
        Err(RepositoryError::Database("connection lost".into()))
    }

    async fn update(&self, _item: &T) -> RepositoryResult<()> {
        Err(RepositoryError::Database("connection lost".into()))
    }

    async fn get_all(&self) -> RepositoryResult<Vec<T>> {
        Err(RepositoryError::Database("connection lost".into()))
    }

    async fn get_by_id(&self, _id: &T::Key) -> RepositoryResult<Option<T>> {
        Err(RepositoryError::Database("connection lost".into()))
    }

    async fn get_by_scope(&self, _scope: &T::Scope) -> RepositoryResult<Vec<T>> {
        Err(RepositoryError::Database("connection lost".into()))
    }

    async fn get_page(
        &self,
        _page_index: usize,
        _page_size: usize,
    ) -> RepositoryResult<PagedList<T>> {
        Err(RepositoryError::Database("connection lost".into()))
    }

    async fn get_page_by_scope(
        &self,
        _scope: &T::Scope,
        _page_index: usize,
        _page_size: usize,
    ) -> RepositoryResult<PagedList<T>> {
        Err(RepositoryError::Database("connection lost".into()))
    }
}

/// Store with nothing wired up yet; every operation is `NotImplemented`.
pub struct UnwiredStore;

#[async_trait]
impl<T: Entity> Store<T> for UnwiredStore {
    async fn add(&self, _item: &T) -> RepositoryResult<()> {
        Err(RepositoryError::NotImplemented("add"))
    }

    async fn delete(&self, _item: &T) -> RepositoryResult<()> {
        Err(RepositoryError::NotImplemented("delete"))
    }

    async fn update(&self, _item: &T) -> RepositoryResult<()> {
        Err(RepositoryError::NotImplemented("update"))
    }

    async fn get_all(&self) -> RepositoryResult<Vec<T>> {
        Err(RepositoryError::NotImplemented("get_all"))
    }

    async fn get_by_id(&self, _id: &T::Key) -> RepositoryResult<Option<T>> {
        Err(RepositoryError::NotImplemented("get_by_id"))
    }

    async fn get_by_scope(&self, _scope: &T::Scope) -> RepositoryResult<Vec<T>> {
        Err(RepositoryError::NotImplemented("get_by_scope"))
    }

    async fn get_page(
        &self,
        _page_index: usize,
        _page_size: usize,
    ) -> RepositoryResult<PagedList<T>> {
        Err(RepositoryError::NotImplemented("get_page"))
    }

    async fn get_page_by_scope(
        &self,
        _scope: &T::Scope,
        _page_index: usize,
        _page_size: usize,
    ) -> RepositoryResult<PagedList<T>> {
        Err(RepositoryError::NotImplemented("get_page_by_scope"))
    }
}
