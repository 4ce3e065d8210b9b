//! Shared types for both backend and frontend (WASM-compatible).
//!
//! This module contains type definitions that are used by both the backend
//! and the frontend. These types must not depend on backend-only dependencies
//! like `tokio`, `sqlx`, etc.

use serde::{Deserialize, Serialize};

use savemyspot_core::Entity;
use savemyspot_spots::Spot;

pub const EMPTY_LIST_TEXT: &str = "No spots yet. Save one from your current location.";

/// One card in the spot list, pre-formatted for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotView {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// `"lat, lng"` with six decimals.
    pub coordinates: String,
    /// `"Saved <local date/time>"`.
    pub saved: String,
}

impl From<&Spot> for SpotView {
    fn from(spot: &Spot) -> Self {
        let coordinates = spot.coordinates();
        Self {
            id: spot.id().to_string(),
            name: spot.name().to_string(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            coordinates: coordinates.display_label(),
            saved: format!("Saved {}", spot.created_at_label()),
        }
    }
}

/// Arguments of the `save_current_location` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveArgs {
    pub name: String,
}

/// Arguments of the commands that act on one spot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotArgs {
    pub id: String,
}

/// Blocking message shown to the user after a failed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

impl Notice {
    fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
        }
    }

    pub fn load_failed() -> Self {
        Self::new("Load failed", "Could not load saved spots.")
    }

    pub fn permission_needed() -> Self {
        Self::new(
            "Permission needed",
            "Enable location access to save your spot.",
        )
    }

    pub fn location_failed() -> Self {
        Self::new("Save failed", "Could not fetch your current location.")
    }

    pub fn store_failed() -> Self {
        Self::new("Save failed", "Could not store your spot.")
    }

    pub fn delete_failed() -> Self {
        Self::new("Delete failed", "Could not update saved spots.")
    }

    pub fn spot_missing() -> Self {
        Self::new("Navigation failed", "That spot no longer exists.")
    }
}

/// Outcome of a "save current location" request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved(SpotView),
    /// Another save was still in flight; nothing happened.
    Ignored,
    PermissionDenied(Notice),
    LocationFailed(Notice),
    StoreFailed(Notice),
}

impl SaveOutcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            SaveOutcome::PermissionDenied(n)
            | SaveOutcome::LocationFailed(n)
            | SaveOutcome::StoreFailed(n) => Some(n),
            SaveOutcome::Saved(_) | SaveOutcome::Ignored => None,
        }
    }
}

/// Everything the single screen renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenState {
    pub loading: bool,
    pub saving: bool,
    pub spots: Vec<SpotView>,
}

impl ScreenState {
    pub fn save_label(&self) -> &'static str {
        if self.saving { "Saving..." } else { "Save" }
    }

    pub fn empty_text(&self) -> Option<&'static str> {
        (!self.loading && self.spots.is_empty()).then_some(EMPTY_LIST_TEXT)
    }
}
