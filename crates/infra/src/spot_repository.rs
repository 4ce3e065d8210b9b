//! Spot repository: the in-memory spot list kept in step with local storage.
//!
//! The repository is the only write path for saved spots. Every mutation
//! builds the next collection, makes it the in-memory value and writes the
//! whole list under [`STORAGE_KEY`]; the mutation is complete once the write
//! returns.

use chrono::Utc;
use thiserror::Error;

use savemyspot_core::{DomainError, SpotId};
use savemyspot_spots::{CodecError, Coordinates, Spot, SpotCollection};

use crate::kv_store::{KeyValueStore, StoreError};

/// Fixed key the spot list lives under.
pub const STORAGE_KEY: &str = "saved-spots-v1";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Why a load fell back to an empty list.
#[derive(Debug, Error)]
pub enum LoadIssue {
    #[error("saved spots could not be read: {0}")]
    Unreadable(#[source] StoreError),

    #[error("saved spots are corrupt: {0}")]
    Corrupt(#[source] CodecError),
}

/// Result of [`SpotRepository::load`]. Always carries a collection.
#[derive(Debug)]
pub struct LoadOutcome {
    pub spots: SpotCollection,
    /// Set when storage was unreadable or corrupt and the list was reset to empty.
    pub issue: Option<LoadIssue>,
}

impl LoadOutcome {
    pub fn needs_notice(&self) -> bool {
        self.issue.is_some()
    }
}

/// Authoritative spot list backed by a key-value store.
#[derive(Debug)]
pub struct SpotRepository<S> {
    store: S,
    spots: SpotCollection,
}

impl<S> SpotRepository<S>
where
    S: KeyValueStore,
{
    /// Repository with an empty in-memory list. Call [`Self::load`] before use.
    pub fn new(store: S) -> Self {
        Self {
            store,
            spots: SpotCollection::new(),
        }
    }

    pub fn spots(&self) -> &SpotCollection {
        &self.spots
    }

    pub fn find(&self, id: &SpotId) -> Option<&Spot> {
        self.spots.find(id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the in-memory list with what storage holds.
    ///
    /// Absent or empty storage yields an empty list. Unreadable storage and
    /// undecodable content also yield an empty list, reported through
    /// [`LoadOutcome::issue`] so the caller can tell the user.
    pub async fn load(&mut self) -> LoadOutcome {
        let (spots, issue) = match self.store.get_item(STORAGE_KEY).await {
            Ok(None) => (SpotCollection::new(), None),
            Ok(Some(raw)) if raw.is_empty() => (SpotCollection::new(), None),
            Ok(Some(raw)) => match SpotCollection::from_json(&raw) {
                Ok(spots) => (spots, None),
                Err(err) => (SpotCollection::new(), Some(LoadIssue::Corrupt(err))),
            },
            Err(err) => (SpotCollection::new(), Some(LoadIssue::Unreadable(err))),
        };

        match &issue {
            Some(issue) => tracing::warn!(error = %issue, "falling back to empty spot list"),
            None => tracing::info!(count = spots.len(), "loaded saved spots"),
        }

        self.spots = spots.clone();
        LoadOutcome { spots, issue }
    }

    /// Make `spots` the in-memory list, then write it to storage.
    ///
    /// A failed write is returned as-is: the in-memory list keeps the new
    /// value and storage keeps the old one until the next successful save.
    pub async fn save(&mut self, spots: SpotCollection) -> Result<(), RepositoryError> {
        self.spots = spots;
        let encoded = self.spots.to_json()?;
        self.store.set_item(STORAGE_KEY, &encoded).await?;
        tracing::debug!(count = self.spots.len(), "saved spot list");
        Ok(())
    }

    /// Create a spot at `coordinates`, put it first and save.
    pub async fn add_from_location(
        &mut self,
        raw_name: &str,
        coordinates: Coordinates,
    ) -> Result<Spot, RepositoryError> {
        let spot = Spot::create(raw_name, coordinates, self.spots.len(), Utc::now());
        let next = self.spots.with_prepended(spot.clone())?;
        self.save(next).await?;
        tracing::info!(id = %spot.id_typed(), name = spot.name(), "saved new spot");
        Ok(spot)
    }

    /// Drop the spot with `id` and save. Unknown ids still save the
    /// (unchanged) list.
    pub async fn remove(&mut self, id: &SpotId) -> Result<(), RepositoryError> {
        let next = self.spots.without(id);
        let removed = next.len() != self.spots.len();
        self.save(next).await?;
        tracing::info!(%id, removed, "removed spot");
        Ok(())
    }
}
