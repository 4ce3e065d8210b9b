//! Device location boundary.
//!
//! A save attempt goes through [`capture_position`]: ask for foreground
//! permission, then take one fix at the balanced tier. Either step failing
//! ends the attempt with nothing persisted.

pub mod fixed;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use savemyspot_core::DomainError;
use savemyspot_spots::Coordinates;

pub use fixed::FixedLocationProvider;

/// Result of a foreground permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

impl PermissionStatus {
    /// Map a platform status string. Only `"granted"` grants access.
    pub fn from_platform(status: &str) -> Self {
        match status.trim().to_ascii_lowercase().as_str() {
            "granted" => PermissionStatus::Granted,
            "denied" => PermissionStatus::Denied,
            _ => PermissionStatus::Undetermined,
        }
    }

    pub fn is_granted(&self) -> bool {
        *self == PermissionStatus::Granted
    }
}

/// Accuracy/power trade-off tiers for a position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accuracy {
    Lowest,
    Low,
    Balanced,
    High,
    Highest,
    BestForNavigation,
}

/// A one-shot position reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub coordinates: Coordinates,
    /// Horizontal accuracy radius in metres, when the platform reports one.
    pub accuracy_m: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location services unavailable: {0}")]
    Unavailable(String),

    #[error("timed out waiting for a position fix")]
    Timeout,

    #[error("provider returned an invalid fix: {0}")]
    InvalidFix(#[from] DomainError),
}

/// Platform location service.
///
/// Timeouts and cancellation are owned by the implementation; callers await
/// each call once and treat any error as terminal for that attempt.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_foreground_permission(&self) -> Result<PermissionStatus, LocationError>;

    async fn current_position(&self, accuracy: Accuracy) -> Result<PositionFix, LocationError>;
}

#[async_trait]
impl<P> LocationProvider for Arc<P>
where
    P: LocationProvider + ?Sized,
{
    async fn request_foreground_permission(&self) -> Result<PermissionStatus, LocationError> {
        (**self).request_foreground_permission().await
    }

    async fn current_position(&self, accuracy: Accuracy) -> Result<PositionFix, LocationError> {
        (**self).current_position(accuracy).await
    }
}

/// Why a capture attempt ended without coordinates.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("location permission not granted ({0:?})")]
    PermissionDenied(PermissionStatus),

    #[error("could not fetch current location: {0}")]
    Location(#[from] LocationError),
}

/// Permission gate followed by a single balanced-accuracy fix.
pub async fn capture_position<P>(provider: &P) -> Result<Coordinates, CaptureError>
where
    P: LocationProvider + ?Sized,
{
    let status = provider.request_foreground_permission().await?;
    if !status.is_granted() {
        tracing::info!(?status, "location permission not granted");
        return Err(CaptureError::PermissionDenied(status));
    }

    let fix = provider.current_position(Accuracy::Balanced).await?;
    let coordinates = Coordinates::new(fix.coordinates.latitude, fix.coordinates.longitude)
        .map_err(LocationError::from)?;

    tracing::debug!(accuracy_m = ?fix.accuracy_m, "captured position fix");
    Ok(coordinates)
}
