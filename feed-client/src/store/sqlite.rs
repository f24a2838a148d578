//! SQLite favorites store.

use super::{FavoritesStore, StorageError};
use async_trait::async_trait;
use feed_types::{FavoriteRecord, JobId};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// SQLite-based favorites store.
///
/// Uses WAL mode for concurrent reads/writes. Replaces the process-wide
/// lazily-initialized database handle of a typical mobile app: the pool is
/// an explicitly constructed value, injected by whoever composes the
/// repository.
#[derive(Clone)]
pub struct SqliteFavoritesStore {
    pool: SqlitePool,
}

impl SqliteFavoritesStore {
    /// Create a store from a database path.
    ///
    /// Creates the database file if it doesn't exist.
    pub async fn new(path: &Path) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(path.to_str().unwrap_or("favorites.db"))
            .map_err(StorageError::Database)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(StorageError::Database)?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(":memory:")
            .map_err(StorageError::Database)?
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        // A single connection: every in-memory connection is its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(StorageError::Database)?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS favorite_jobs (
                id INTEGER PRIMARY KEY,
                title TEXT,
                place TEXT,
                salary TEXT,
                description TEXT,
                custom_link TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        tracing::debug!("favorites schema ready");
        Ok(())
    }
}

#[async_trait]
impl FavoritesStore for SqliteFavoritesStore {
    async fn get(&self, id: JobId) -> Result<Option<FavoriteRecord>, StorageError> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            r#"
            SELECT id, title, place, salary, description, custom_link
            FROM favorite_jobs
            WHERE id = ?1
            "#,
        )
        .bind(id.value() as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        Ok(row.map(FavoriteRow::into_record))
    }

    async fn get_all(&self) -> Result<Vec<FavoriteRecord>, StorageError> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            r#"
            SELECT id, title, place, salary, description, custom_link
            FROM favorite_jobs
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        Ok(rows.into_iter().map(FavoriteRow::into_record).collect())
    }

    async fn insert(&self, record: &FavoriteRecord) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO favorite_jobs (id, title, place, salary, description, custom_link)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                place = excluded.place,
                salary = excluded.salary,
                description = excluded.description,
                custom_link = excluded.custom_link
            "#,
        )
        .bind(record.id.value() as i64)
        .bind(&record.title)
        .bind(&record.place)
        .bind(&record.salary)
        .bind(&record.description)
        .bind(&record.custom_link)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Database)?;

        Ok(())
    }

    async fn delete(&self, id: JobId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM favorite_jobs WHERE id = ?1")
            .bind(id.value() as i64)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Database)?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    id: i64,
    title: Option<String>,
    place: Option<String>,
    salary: Option<String>,
    description: Option<String>,
    custom_link: Option<String>,
}

impl FavoriteRow {
    fn into_record(self) -> FavoriteRecord {
        FavoriteRecord {
            id: JobId::new(self.id as u64),
            title: self.title,
            place: self.place,
            salary: self.salary,
            description: self.description,
            custom_link: self.custom_link,
        }
    }
}
