use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use savemyspot_spots::Coordinates;

use super::{Accuracy, LocationError, LocationProvider, PermissionStatus, PositionFix};

/// Location provider that answers from configuration.
///
/// Used where there is no positioning hardware (desktop shell, tests): the
/// permission answer and the fix are fixed at construction. Without a fix,
/// every position request fails as unavailable.
#[derive(Debug)]
pub struct FixedLocationProvider {
    permission: PermissionStatus,
    fix: Option<Coordinates>,
    fix_requests: AtomicUsize,
    last_accuracy: Mutex<Option<Accuracy>>,
}

impl FixedLocationProvider {
    pub fn new(permission: PermissionStatus, fix: Option<Coordinates>) -> Self {
        Self {
            permission,
            fix,
            fix_requests: AtomicUsize::new(0),
            last_accuracy: Mutex::new(None),
        }
    }

    /// Number of position requests served so far.
    pub fn fix_requests(&self) -> usize {
        self.fix_requests.load(Ordering::SeqCst)
    }

    pub fn last_accuracy(&self) -> Option<Accuracy> {
        self.last_accuracy.lock().ok().and_then(|guard| *guard)
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn request_foreground_permission(&self) -> Result<PermissionStatus, LocationError> {
        Ok(self.permission)
    }

    async fn current_position(&self, accuracy: Accuracy) -> Result<PositionFix, LocationError> {
        self.fix_requests.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_accuracy.lock() {
            *last = Some(accuracy);
        }

        let coordinates = self
            .fix
            .ok_or_else(|| LocationError::Unavailable("no position fix configured".to_string()))?;

        Ok(PositionFix {
            coordinates,
            accuracy_m: None,
            timestamp: Utc::now(),
        })
    }
}
