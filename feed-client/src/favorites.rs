//! FavoritesRepository - durable favorite membership with a reactive view.
//!
//! The repository publishes the favorite-id set through a watch channel and
//! keeps it a pure function of the store's durable contents: the set is
//! only ever rebuilt from a full read after a mutation succeeds
//! (read-after-write), never patched from the pre-toggle state plus a local
//! delta. That keeps the in-memory view honest even when other repository
//! instances (or anything else) write the same store concurrently.

use std::collections::BTreeSet;
use tokio::sync::{watch, Mutex};

use crate::store::{FavoritesStore, StorageError};
use feed_types::{FavoriteRecord, Job, JobId};

/// Maintains a consistent, reactive view of favorite membership backed by
/// durable storage. Toggle is the sole mutation primitive.
pub struct FavoritesRepository<S: FavoritesStore> {
    store: S,
    ids: watch::Sender<BTreeSet<JobId>>,
    // Serializes the check-then-act sequences across await points.
    write_lock: Mutex<()>,
}

impl<S: FavoritesStore> FavoritesRepository<S> {
    /// Create a repository over the given store.
    ///
    /// The published set starts empty until [`initialize`] resolves; until
    /// then every listing reads as unfavorited. This cold-start window is
    /// part of the contract.
    ///
    /// [`initialize`]: FavoritesRepository::initialize
    pub fn new(store: S) -> Self {
        let (ids, _) = watch::channel(BTreeSet::new());
        Self {
            store,
            ids,
            write_lock: Mutex::new(()),
        }
    }

    /// Load the persisted set and publish it.
    ///
    /// Must be awaited before the published set is authoritative.
    pub async fn initialize(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let records = self.store.get_all().await?;
        let set: BTreeSet<JobId> = records.iter().map(|r| r.id).collect();
        tracing::debug!("Loaded {} persisted favorites", set.len());
        self.ids.send_replace(set);
        Ok(())
    }

    /// Flip the favorite membership of a listing.
    ///
    /// Exactly one store mutation per call: deletes the record if the id is
    /// present, otherwise inserts a snapshot of `job`. The published set is
    /// then rebuilt from a full read of the store. Returns the new
    /// membership.
    ///
    /// On any storage failure the toggle is abandoned: nothing is
    /// republished, observers keep the pre-call set, and the error is
    /// returned to the caller.
    pub async fn toggle_favorite(&self, job: &Job) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;

        let present = self.store.get(job.id).await?.is_some();
        if present {
            self.store.delete(job.id).await?;
        } else {
            self.store
                .insert(&FavoriteRecord::snapshot_of(job))
                .await?;
        }

        // Read-after-write: republish from exactly what is durable.
        let records = self.store.get_all().await?;
        let set: BTreeSet<JobId> = records.iter().map(|r| r.id).collect();
        let now_favorite = set.contains(&job.id);
        self.ids.send_replace(set);

        tracing::debug!(
            "Toggled job {}: {}",
            job.id,
            if now_favorite { "favorited" } else { "unfavorited" }
        );
        Ok(now_favorite)
    }

    /// Whether an id is in the last-published set. No store access.
    pub fn is_favorite(&self, id: JobId) -> bool {
        self.ids.borrow().contains(&id)
    }

    /// The last-published favorite-id set.
    pub fn favorite_ids(&self) -> BTreeSet<JobId> {
        self.ids.borrow().clone()
    }

    /// Subscribe to favorite-id set snapshots.
    pub fn subscribe(&self) -> watch::Receiver<BTreeSet<JobId>> {
        self.ids.subscribe()
    }

    /// The persisted snapshots, for rendering the favorites list offline.
    pub async fn favorite_records(&self) -> Result<Vec<FavoriteRecord>, StorageError> {
        self.store.get_all().await
    }

    /// Get a reference to the underlying store (for testing).
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryFavoritesStore;

    fn job(id: u64, title: &str) -> Job {
        Job::new(JobId::new(id)).with_title(title)
    }

    // ===========================================
    // Initialization Tests
    // ===========================================

    #[tokio::test]
    async fn cold_start_is_empty_until_initialized() {
        let store = MemoryFavoritesStore::new();
        store
            .insert(&FavoriteRecord::snapshot_of(&job(1, "A")))
            .await
            .unwrap();

        let repo = FavoritesRepository::new(store);
        assert!(!repo.is_favorite(JobId::new(1)));
        assert!(repo.favorite_ids().is_empty());

        repo.initialize().await.unwrap();
        assert!(repo.is_favorite(JobId::new(1)));
    }

    #[tokio::test]
    async fn initialize_failure_keeps_empty_set() {
        let store = MemoryFavoritesStore::new();
        store
            .insert(&FavoriteRecord::snapshot_of(&job(1, "A")))
            .await
            .unwrap();
        store.fail_next_get_all("locked");

        let repo = FavoritesRepository::new(store);
        assert!(repo.initialize().await.is_err());
        assert!(repo.favorite_ids().is_empty());

        // Retry succeeds
        repo.initialize().await.unwrap();
        assert!(repo.is_favorite(JobId::new(1)));
    }

    // ===========================================
    // Toggle Tests
    // ===========================================

    #[tokio::test]
    async fn toggle_on_empty_store_inserts_snapshot() {
        let store = MemoryFavoritesStore::new();
        let repo = FavoritesRepository::new(store.clone());
        repo.initialize().await.unwrap();

        let now = repo.toggle_favorite(&job(5, "Driver")).await.unwrap();

        assert!(now);
        assert_eq!(store.len(), 1);
        let record = store.get(JobId::new(5)).await.unwrap().unwrap();
        assert_eq!(record.title.as_deref(), Some("Driver"));
        assert_eq!(
            repo.favorite_ids(),
            [JobId::new(5)].into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[tokio::test]
    async fn toggle_twice_restores_prior_set() {
        let store = MemoryFavoritesStore::new();
        let repo = FavoritesRepository::new(store.clone());
        repo.initialize().await.unwrap();
        repo.toggle_favorite(&job(1, "kept")).await.unwrap();
        let before = repo.favorite_ids();

        let target = job(5, "flipped");
        assert!(repo.toggle_favorite(&target).await.unwrap());
        assert!(!repo.toggle_favorite(&target).await.unwrap());

        assert_eq!(repo.favorite_ids(), before);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn membership_is_visible_immediately_after_toggle() {
        let repo = FavoritesRepository::new(MemoryFavoritesStore::new());
        repo.initialize().await.unwrap();

        repo.toggle_favorite(&job(3, "A")).await.unwrap();
        assert!(repo.is_favorite(JobId::new(3)));

        repo.toggle_favorite(&job(3, "A")).await.unwrap();
        assert!(!repo.is_favorite(JobId::new(3)));
    }

    #[tokio::test]
    async fn toggle_reflects_external_store_writes() {
        let store = MemoryFavoritesStore::new();
        let repo = FavoritesRepository::new(store.clone());
        repo.initialize().await.unwrap();

        // Another writer (a second screen, say) adds a favorite directly.
        store
            .insert(&FavoriteRecord::snapshot_of(&job(8, "external")))
            .await
            .unwrap();

        repo.toggle_favorite(&job(2, "mine")).await.unwrap();

        // The republished set is a pure function of the store's contents.
        let expected: BTreeSet<JobId> = [JobId::new(2), JobId::new(8)].into_iter().collect();
        assert_eq!(repo.favorite_ids(), expected);
    }

    // ===========================================
    // Failure Tests
    // ===========================================

    #[tokio::test]
    async fn insert_failure_leaves_set_and_store_untouched() {
        let store = MemoryFavoritesStore::new();
        let repo = FavoritesRepository::new(store.clone());
        repo.initialize().await.unwrap();
        let before = repo.favorite_ids();

        store.fail_next_insert("disk full");
        let result = repo.toggle_favorite(&job(5, "A")).await;

        assert!(result.is_err());
        assert_eq!(repo.favorite_ids(), before);
        assert!(store.is_empty());

        // Retrying the same toggle succeeds
        assert!(repo.toggle_favorite(&job(5, "A")).await.unwrap());
    }

    #[tokio::test]
    async fn delete_failure_keeps_membership() {
        let store = MemoryFavoritesStore::new();
        let repo = FavoritesRepository::new(store.clone());
        repo.initialize().await.unwrap();
        repo.toggle_favorite(&job(5, "A")).await.unwrap();

        store.fail_next_delete("locked");
        let result = repo.toggle_favorite(&job(5, "A")).await;

        assert!(result.is_err());
        assert!(repo.is_favorite(JobId::new(5)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn membership_check_failure_aborts_before_mutating() {
        let store = MemoryFavoritesStore::new();
        let repo = FavoritesRepository::new(store.clone());
        repo.initialize().await.unwrap();

        store.fail_next_get("locked");
        let result = repo.toggle_favorite(&job(5, "A")).await;

        assert!(result.is_err());
        assert!(store.is_empty());
        assert!(repo.favorite_ids().is_empty());
    }

    #[tokio::test]
    async fn reread_failure_is_not_published() {
        let store = MemoryFavoritesStore::new();
        let repo = FavoritesRepository::new(store.clone());
        repo.initialize().await.unwrap();

        // The insert lands but the read-after-write fails: observers keep
        // the pre-call set and the caller sees the error.
        store.fail_next_get_all("locked");
        let result = repo.toggle_favorite(&job(5, "A")).await;

        assert!(result.is_err());
        assert!(repo.favorite_ids().is_empty());
        assert_eq!(store.len(), 1);
    }

    // ===========================================
    // Observation Tests
    // ===========================================

    #[tokio::test]
    async fn subscriber_sees_republished_set() {
        let repo = FavoritesRepository::new(MemoryFavoritesStore::new());
        repo.initialize().await.unwrap();
        let mut rx = repo.subscribe();
        rx.borrow_and_update();

        repo.toggle_favorite(&job(4, "A")).await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().contains(&JobId::new(4)));
    }

    #[tokio::test]
    async fn favorite_records_returns_snapshots() {
        let repo = FavoritesRepository::new(MemoryFavoritesStore::new());
        repo.initialize().await.unwrap();
        repo.toggle_favorite(&job(1, "A")).await.unwrap();
        repo.toggle_favorite(&job(2, "B")).await.unwrap();

        let records = repo.favorite_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title.as_deref(), Some("A"));

        // Snapshots rebuild offline-renderable jobs
        let rebuilt = records[1].clone().into_job();
        assert_eq!(rebuilt.id, JobId::new(2));
        assert!(rebuilt.requirements.is_none());
    }
}
