//! Ordered, newest-first collection of spots.

use serde::{Deserialize, Serialize};

use savemyspot_core::{DomainError, DomainResult, Entity, SpotId};

use crate::spot::Spot;

/// Saved spots, newest first.
///
/// All operations are pure: they return a new collection and leave `self`
/// untouched, so the repository can decide when the new value becomes
/// authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotCollection(Vec<Spot>);

impl SpotCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spot> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Spot] {
        &self.0
    }

    pub fn find(&self, id: &SpotId) -> Option<&Spot> {
        self.0.iter().find(|spot| spot.id() == id)
    }

    pub fn contains(&self, id: &SpotId) -> bool {
        self.find(id).is_some()
    }

    /// New collection with `spot` at position 0.
    ///
    /// Rejects a spot whose id is already present.
    pub fn with_prepended(&self, spot: Spot) -> DomainResult<Self> {
        if self.contains(spot.id()) {
            return Err(DomainError::invariant(format!(
                "duplicate spot id: {}",
                spot.id()
            )));
        }
        let mut spots = Vec::with_capacity(self.0.len() + 1);
        spots.push(spot);
        spots.extend(self.0.iter().cloned());
        Ok(Self(spots))
    }

    /// New collection without any spot carrying `id`. Unknown ids are a no-op.
    pub fn without(&self, id: &SpotId) -> Self {
        Self(
            self.0
                .iter()
                .filter(|spot| spot.id() != id)
                .cloned()
                .collect(),
        )
    }
}

impl From<Vec<Spot>> for SpotCollection {
    fn from(spots: Vec<Spot>) -> Self {
        Self(spots)
    }
}

impl IntoIterator for SpotCollection {
    type Item = Spot;
    type IntoIter = std::vec::IntoIter<Spot>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SpotCollection {
    type Item = &'a Spot;
    type IntoIter = std::slice::Iter<'a, Spot>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
