//! Favorites storage for jobfeed.
//!
//! Provides key-based CRUD over persisted favorite snapshots. The store is
//! the only resource shared across repository instances; implementations
//! serialize concurrent writers themselves (SQLite's busy handling, the
//! memory store's mutex).

mod memory;
mod sqlite;

pub use memory::MemoryFavoritesStore;
pub use sqlite::SqliteFavoritesStore;

use async_trait::async_trait;
use feed_types::{FavoriteRecord, JobId};
use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Storage I/O failure (used by non-database backends).
    #[error("storage I/O failed: {0}")]
    Io(String),
}

/// Trait for favorite-snapshot storage backends.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Get the persisted snapshot for an id, if present.
    async fn get(&self, id: JobId) -> Result<Option<FavoriteRecord>, StorageError>;

    /// Get all persisted snapshots, ordered by id.
    async fn get_all(&self) -> Result<Vec<FavoriteRecord>, StorageError>;

    /// Insert a snapshot. Upsert by id: writing an id that already exists
    /// replaces the prior snapshot (last-write-wins).
    async fn insert(&self, record: &FavoriteRecord) -> Result<(), StorageError>;

    /// Delete the snapshot for an id. Deleting an absent id is a no-op.
    async fn delete(&self, id: JobId) -> Result<(), StorageError>;
}
