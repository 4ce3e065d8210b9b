//! SQLite-backed key-value store.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tokio::sync::Mutex;

use super::r#trait::{KeyValueStore, StoreError};

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

/// Durable key-value store in a local SQLite file.
///
/// The connection pool is opened lazily on first use, so constructing the
/// store never touches the filesystem. Every write is a single upsert
/// statement, which SQLite applies atomically.
#[derive(Debug, Clone)]
pub struct SqliteKeyValueStore {
    location: Location,
    pool: Arc<Mutex<Option<SqlitePool>>>,
}

impl SqliteKeyValueStore {
    /// Store backed by the database file at `path` (created if missing).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
            pool: Arc::new(Mutex::new(None)),
        }
    }

    /// Private in-memory database; contents vanish with the store.
    pub fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            pool: Arc::new(Mutex::new(None)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Memory => None,
        }
    }

    async fn connect(&self) -> Result<SqlitePool, StoreError> {
        let pool = match &self.location {
            Location::File(path) => {
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        StoreError::Unavailable(format!(
                            "failed to create storage directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
                let options = SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true);
                SqlitePoolOptions::new()
                    .connect_with(options)
                    .await
                    .map_err(|e| {
                        StoreError::Unavailable(format!(
                            "failed to open {}: {e}",
                            path.display()
                        ))
                    })?
            }
            Location::Memory => {
                // Each in-memory connection is its own database, so pin the
                // pool to a single connection that never expires.
                let options = SqliteConnectOptions::from_str("sqlite::memory:")
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?;
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await
                    .map_err(|e| StoreError::Unavailable(e.to_string()))?
            }
        };

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Unavailable(format!("failed to create kv_store table: {e}")))?;

        tracing::debug!(location = ?self.location, "opened sqlite key-value store");
        Ok(pool)
    }

    /// Get the pool, initializing if necessary.
    async fn pool(&self) -> Result<SqlitePool, StoreError> {
        let mut guard = self.pool.lock().await;
        if let Some(pool) = guard.as_ref() {
            return Ok(pool.clone());
        }
        let pool = self.connect().await?;
        *guard = Some(pool.clone());
        Ok(pool)
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&pool)
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        match row {
            Some(row) => {
                let value: String = row
                    .try_get("value")
                    .map_err(|e| StoreError::Read(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key)
            DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&pool)
        .await
        .map_err(|e| StoreError::Write(e.to_string()))?;

        tracing::debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&pool)
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_replaces_value() {
        let store = SqliteKeyValueStore::in_memory();
        assert_eq!(store.get_item("saved-spots-v1").await.unwrap(), None);

        store.set_item("saved-spots-v1", "[]").await.unwrap();
        store.set_item("saved-spots-v1", "[1]").await.unwrap();
        assert_eq!(
            store.get_item("saved-spots-v1").await.unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[tokio::test]
    async fn remove_deletes_key() {
        let store = SqliteKeyValueStore::in_memory();
        store.set_item("k", "v").await.unwrap();
        store.remove_item("k").await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.db");

        let store = SqliteKeyValueStore::open(&path);
        store.set_item("k", "persisted").await.unwrap();
        drop(store);

        let reopened = SqliteKeyValueStore::open(&path);
        assert_eq!(
            reopened.get_item("k").await.unwrap().as_deref(),
            Some("persisted")
        );
        assert_eq!(reopened.path(), Some(path.as_path()));
    }
}
