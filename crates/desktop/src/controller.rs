//! Screen controller: the one place UI events turn into repository calls.
//!
//! Holds the repository plus the two UI flags (`loading`, `saving`). The
//! saving flag doubles as the in-progress guard: while a save is running, a
//! second request is dropped rather than queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tokio::sync::Mutex;

use savemyspot_core::SpotId;
use savemyspot_infra::kv_store::{KeyValueStore, SqliteKeyValueStore};
use savemyspot_infra::location::{
    CaptureError, FixedLocationProvider, LocationProvider, capture_position,
};
use savemyspot_infra::navigation::{NavigationTarget, SystemUrlOpener, UrlOpener, open_navigation};
use savemyspot_infra::{AppConfig, RepositoryError, SpotRepository};

use crate::notifier::Notifier;
use crate::types::{Notice, SaveOutcome, ScreenState, SpotView};

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("spot not found: {0}")]
    NotFound(SpotId),
}

/// Releases the saving flag on drop, whichever way the save ends.
struct SavingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SavingGuard<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

pub struct SpotController {
    repository: Mutex<SpotRepository<Arc<dyn KeyValueStore>>>,
    location: Arc<dyn LocationProvider>,
    opener: Arc<dyn UrlOpener>,
    notifier: Arc<dyn Notifier>,
    loading: AtomicBool,
    saving: AtomicBool,
}

impl SpotController {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        location: Arc<dyn LocationProvider>,
        opener: Arc<dyn UrlOpener>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repository: Mutex::new(SpotRepository::new(store)),
            location,
            opener,
            notifier,
            loading: AtomicBool::new(true),
            saving: AtomicBool::new(false),
        }
    }

    /// Wire the controller to the adapters named by `config`.
    ///
    /// Storage is opened lazily, so this does not touch the filesystem.
    pub fn from_config(config: &AppConfig, notifier: Arc<dyn Notifier>) -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteKeyValueStore::open(&config.db_path));
        let location: Arc<dyn LocationProvider> = Arc::new(FixedLocationProvider::new(
            config.location_permission,
            config.fixed_location,
        ));
        let opener: Arc<dyn UrlOpener> =
            Arc::new(SystemUrlOpener::new(config.native_schemes.iter().cloned()));
        Self::new(store, location, opener, notifier)
    }

    /// Initial load. Falls back to an empty list (with a notice) on any
    /// storage or decoding problem.
    pub async fn load_spots(&self) -> Vec<SpotView> {
        let outcome = self.repository.lock().await.load().await;
        if outcome.needs_notice() {
            self.notifier.notify(&Notice::load_failed());
        }
        self.loading.store(false, Ordering::SeqCst);
        outcome.spots.iter().map(SpotView::from).collect()
    }

    /// Capture the current position and save it as a new spot.
    pub async fn save_current_location(&self, raw_name: &str) -> SaveOutcome {
        let Some(_guard) = SavingGuard::try_acquire(&self.saving) else {
            tracing::debug!("save already in progress, ignoring request");
            return SaveOutcome::Ignored;
        };

        // No repository lock while waiting on the platform.
        let coordinates = match capture_position(self.location.as_ref()).await {
            Ok(coordinates) => coordinates,
            Err(CaptureError::PermissionDenied(_)) => {
                return self.fail(SaveOutcome::PermissionDenied(Notice::permission_needed()));
            }
            Err(err @ CaptureError::Location(_)) => {
                tracing::warn!(error = %err, "position fix failed");
                return self.fail(SaveOutcome::LocationFailed(Notice::location_failed()));
            }
        };

        let mut repository = self.repository.lock().await;
        match repository.add_from_location(raw_name, coordinates).await {
            Ok(spot) => SaveOutcome::Saved(SpotView::from(&spot)),
            Err(err) => {
                // The fix is discarded; the user can simply save again.
                tracing::error!(error = %err, "failed to persist new spot");
                self.fail(SaveOutcome::StoreFailed(Notice::store_failed()))
            }
        }
    }

    pub async fn remove_spot(&self, id: &SpotId) -> Result<(), ControllerError> {
        let result = self.repository.lock().await.remove(id).await;
        if let Err(err) = &result {
            tracing::error!(error = %err, %id, "failed to persist spot removal");
            self.notifier.notify(&Notice::delete_failed());
        }
        Ok(result?)
    }

    /// Open driving directions to a saved spot.
    pub async fn open_in_maps(&self, id: &SpotId) -> Result<NavigationTarget, ControllerError> {
        let destination = {
            let repository = self.repository.lock().await;
            repository.find(id).map(|spot| spot.coordinates())
        };
        let Some(destination) = destination else {
            self.notifier.notify(&Notice::spot_missing());
            return Err(ControllerError::NotFound(id.clone()));
        };
        Ok(open_navigation(self.opener.as_ref(), destination).await)
    }

    pub async fn screen(&self) -> ScreenState {
        let repository = self.repository.lock().await;
        ScreenState {
            loading: self.loading.load(Ordering::SeqCst),
            saving: self.saving.load(Ordering::SeqCst),
            spots: repository.spots().iter().map(SpotView::from).collect(),
        }
    }

    fn fail(&self, outcome: SaveOutcome) -> SaveOutcome {
        if let Some(notice) = outcome.notice() {
            self.notifier.notify(notice);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use savemyspot_infra::STORAGE_KEY;
    use savemyspot_infra::kv_store::InMemoryKeyValueStore;
    use savemyspot_infra::location::{Accuracy, LocationError, PermissionStatus, PositionFix};
    use savemyspot_infra::navigation::LaunchError;
    use savemyspot_spots::{Coordinates, SpotCollection};
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct RecordingNotifier {
        notices: StdMutex<Vec<Notice>>,
    }

    impl RecordingNotifier {
        fn notices(&self) -> Vec<Notice> {
            self.notices.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: &Notice) {
            self.notices.lock().unwrap().push(notice.clone());
        }
    }

    #[derive(Default)]
    struct RecordingOpener {
        opened: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl UrlOpener for RecordingOpener {
        async fn can_open(&self, _url: &str) -> Result<bool, LaunchError> {
            Ok(false)
        }

        async fn open(&self, url: &str) -> Result<(), LaunchError> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    /// Location provider whose fix blocks until released.
    struct GatedLocation {
        release: Notify,
        started: AtomicUsize,
    }

    #[async_trait]
    impl LocationProvider for GatedLocation {
        async fn request_foreground_permission(&self) -> Result<PermissionStatus, LocationError> {
            Ok(PermissionStatus::Granted)
        }

        async fn current_position(&self, _accuracy: Accuracy) -> Result<PositionFix, LocationError> {
            self.started.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(PositionFix {
                coordinates: test_coordinates(),
                accuracy_m: Some(12.0),
                timestamp: chrono::Utc::now(),
            })
        }
    }

    struct Harness {
        controller: SpotController,
        store: Arc<InMemoryKeyValueStore>,
        notifier: Arc<RecordingNotifier>,
        opener: Arc<RecordingOpener>,
    }

    fn test_coordinates() -> Coordinates {
        Coordinates::new(40.6892, -74.0445).unwrap()
    }

    fn harness_with(store: InMemoryKeyValueStore, location: Arc<dyn LocationProvider>) -> Harness {
        let store = Arc::new(store);
        let notifier = Arc::new(RecordingNotifier::default());
        let opener = Arc::new(RecordingOpener::default());
        let controller = SpotController::new(
            store.clone(),
            location,
            opener.clone(),
            notifier.clone(),
        );
        Harness {
            controller,
            store,
            notifier,
            opener,
        }
    }

    fn harness(permission: PermissionStatus, fix: Option<Coordinates>) -> Harness {
        harness_with(
            InMemoryKeyValueStore::new(),
            Arc::new(FixedLocationProvider::new(permission, fix)),
        )
    }

    #[tokio::test]
    async fn load_marks_screen_loaded() {
        let h = harness(PermissionStatus::Granted, None);
        assert!(h.controller.screen().await.loading);

        assert!(h.controller.load_spots().await.is_empty());
        let screen = h.controller.screen().await;
        assert!(!screen.loading);
        assert_eq!(screen.empty_text(), Some(crate::types::EMPTY_LIST_TEXT));
        assert!(h.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn corrupt_storage_notifies_and_stays_usable() {
        let h = harness_with(
            InMemoryKeyValueStore::with_entry(STORAGE_KEY, "not-json"),
            Arc::new(FixedLocationProvider::new(
                PermissionStatus::Granted,
                Some(test_coordinates()),
            )),
        );

        assert!(h.controller.load_spots().await.is_empty());
        assert_eq!(h.notifier.notices(), vec![Notice::load_failed()]);

        let outcome = h.controller.save_current_location("Statue").await;
        assert!(matches!(outcome, SaveOutcome::Saved(ref v) if v.name == "Statue"));
    }

    #[tokio::test]
    async fn save_persists_and_returns_view() {
        let h = harness(PermissionStatus::Granted, Some(test_coordinates()));
        h.controller.load_spots().await;

        let SaveOutcome::Saved(view) = h.controller.save_current_location("").await else {
            panic!("expected saved outcome");
        };
        assert_eq!(view.name, "Spot 1");
        assert_eq!(view.coordinates, "40.689200, -74.044500");
        assert!(view.saved.starts_with("Saved "));

        let stored = SpotCollection::from_json(&h.store.raw(STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
        assert!(!h.controller.screen().await.saving);
    }

    #[tokio::test]
    async fn denied_permission_writes_nothing() {
        let h = harness(PermissionStatus::Denied, Some(test_coordinates()));
        h.controller.load_spots().await;

        let outcome = h.controller.save_current_location("x").await;
        assert_eq!(
            outcome,
            SaveOutcome::PermissionDenied(Notice::permission_needed())
        );
        assert_eq!(h.notifier.notices(), vec![Notice::permission_needed()]);
        assert_eq!(h.store.raw(STORAGE_KEY), None);
        assert!(!h.controller.screen().await.saving);
    }

    #[tokio::test]
    async fn fix_failure_writes_nothing() {
        let h = harness(PermissionStatus::Granted, None);
        h.controller.load_spots().await;

        let outcome = h.controller.save_current_location("x").await;
        assert_eq!(outcome, SaveOutcome::LocationFailed(Notice::location_failed()));
        assert_eq!(h.store.raw(STORAGE_KEY), None);
        assert!(h.controller.screen().await.spots.is_empty());
    }

    #[tokio::test]
    async fn write_failure_notifies_and_releases_guard() {
        let h = harness(PermissionStatus::Granted, Some(test_coordinates()));
        h.controller.load_spots().await;
        h.store.fail_writes(true);

        let outcome = h.controller.save_current_location("x").await;
        assert_eq!(outcome, SaveOutcome::StoreFailed(Notice::store_failed()));
        assert!(!h.controller.screen().await.saving);

        h.store.fail_writes(false);
        assert!(matches!(
            h.controller.save_current_location("y").await,
            SaveOutcome::Saved(_)
        ));
    }

    #[tokio::test]
    async fn second_save_while_first_in_flight_is_ignored() {
        let location = Arc::new(GatedLocation {
            release: Notify::new(),
            started: AtomicUsize::new(0),
        });
        let h = harness_with(InMemoryKeyValueStore::new(), location.clone());
        h.controller.load_spots().await;

        let first = h.controller.save_current_location("first");
        let second = async {
            // Wait until the first save is parked on the fix, then try again.
            while location.started.load(Ordering::SeqCst) == 0 {
                tokio::task::yield_now().await;
            }
            assert!(h.controller.screen().await.saving);
            let outcome = h.controller.save_current_location("second").await;
            location.release.notify_one();
            outcome
        };

        let (first, second) = tokio::join!(first, second);
        assert!(matches!(first, SaveOutcome::Saved(ref v) if v.name == "first"));
        assert_eq!(second, SaveOutcome::Ignored);
        assert_eq!(location.started.load(Ordering::SeqCst), 1);
        assert_eq!(h.controller.screen().await.spots.len(), 1);
    }

    #[tokio::test]
    async fn remove_and_navigate() {
        let h = harness(PermissionStatus::Granted, Some(test_coordinates()));
        h.controller.load_spots().await;
        let SaveOutcome::Saved(view) = h.controller.save_current_location("Ferry").await else {
            panic!("expected saved outcome");
        };
        let id: SpotId = view.id.parse().unwrap();

        let target = h.controller.open_in_maps(&id).await.unwrap();
        assert_eq!(target, NavigationTarget::Web);
        assert_eq!(
            h.opener.opened.lock().unwrap().clone(),
            vec![
                "https://www.google.com/maps/dir/?api=1&destination=40.6892,-74.0445&travelmode=driving"
                    .to_string()
            ]
        );

        h.controller.remove_spot(&id).await.unwrap();
        assert!(h.controller.screen().await.spots.is_empty());
        assert_eq!(h.store.raw(STORAGE_KEY).as_deref(), Some("[]"));

        let err = h.controller.open_in_maps(&id).await.unwrap_err();
        assert!(matches!(err, ControllerError::NotFound(_)));
        assert_eq!(h.notifier.notices(), vec![Notice::spot_missing()]);
    }

    #[tokio::test]
    async fn failed_remove_notifies() {
        let h = harness(PermissionStatus::Granted, Some(test_coordinates()));
        h.controller.load_spots().await;
        h.store.fail_writes(true);

        let err = h
            .controller
            .remove_spot(&"missing".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ControllerError::Repository(_)));
        assert_eq!(h.notifier.notices(), vec![Notice::delete_failed()]);
    }

    #[tokio::test]
    async fn from_config_uses_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            db_path: dir.path().join("storage.db"),
            fixed_location: Some(test_coordinates()),
            location_permission: PermissionStatus::Granted,
            native_schemes: Vec::new(),
        };

        let controller = SpotController::from_config(&config, Arc::new(RecordingNotifier::default()));
        controller.load_spots().await;
        assert!(matches!(
            controller.save_current_location("Home").await,
            SaveOutcome::Saved(_)
        ));
        drop(controller);

        let reopened =
            SpotController::from_config(&config, Arc::new(RecordingNotifier::default()));
        let spots = reopened.load_spots().await;
        assert_eq!(spots.len(), 1);
        assert_eq!(spots[0].name, "Home");
    }
}
