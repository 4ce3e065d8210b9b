use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Key-value store operation error.
///
/// These are **infrastructure errors** (IO, locking, driver failures) as
/// opposed to domain errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String-valued key-value store that survives restarts.
///
/// ## Semantics
///
/// - `get_item` returns `Ok(None)` for a key that was never written
/// - `set_item` replaces the whole value; once it returns `Ok`, a subsequent
///   `get_item` observes exactly that value
/// - a failed `set_item` leaves the previous value in place (no torn writes)
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key).await
    }
}
