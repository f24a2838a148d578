//! In-memory favorites store for testing.
//!
//! Backed by a shared map, with per-operation failure injection for
//! exercising abort paths.

use super::{FavoritesStore, StorageError};
use async_trait::async_trait;
use feed_types::{FavoriteRecord, JobId};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// In-memory favorites store.
///
/// Clones share state, so a test can hold one handle while the repository
/// under test holds another.
#[derive(Debug, Default)]
pub struct MemoryFavoritesStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    records: BTreeMap<u64, FavoriteRecord>,
    fail_next_get: Option<String>,
    fail_next_get_all: Option<String>,
    fail_next_insert: Option<String>,
    fail_next_delete: Option<String>,
}

impl MemoryFavoritesStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted records.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    /// True if no records are persisted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cause the next `get()` to fail with the given error.
    pub fn fail_next_get(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_get = Some(error.to_string());
    }

    /// Cause the next `get_all()` to fail with the given error.
    pub fn fail_next_get_all(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_get_all = Some(error.to_string());
    }

    /// Cause the next `insert()` to fail with the given error.
    pub fn fail_next_insert(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_insert = Some(error.to_string());
    }

    /// Cause the next `delete()` to fail with the given error.
    pub fn fail_next_delete(&self, error: &str) {
        self.inner.lock().unwrap().fail_next_delete = Some(error.to_string());
    }
}

impl Clone for MemoryFavoritesStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl FavoritesStore for MemoryFavoritesStore {
    async fn get(&self, id: JobId) -> Result<Option<FavoriteRecord>, StorageError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_get.take() {
            return Err(StorageError::Io(error));
        }
        Ok(inner.records.get(&id.value()).cloned())
    }

    async fn get_all(&self) -> Result<Vec<FavoriteRecord>, StorageError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_get_all.take() {
            return Err(StorageError::Io(error));
        }
        Ok(inner.records.values().cloned().collect())
    }

    async fn insert(&self, record: &FavoriteRecord) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_insert.take() {
            return Err(StorageError::Io(error));
        }
        inner.records.insert(record.id.value(), record.clone());
        Ok(())
    }

    async fn delete(&self, id: JobId) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(error) = inner.fail_next_delete.take() {
            return Err(StorageError::Io(error));
        }
        inner.records.remove(&id.value());
        Ok(())
    }
}
