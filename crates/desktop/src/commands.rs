//! Tauri commands for frontend integration.

use std::sync::Arc;

use savemyspot_core::SpotId;
use savemyspot_infra::navigation::NavigationTarget;
use tauri::{AppHandle, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogKind};

use crate::controller::SpotController;
use crate::notifier::Notifier;
use crate::types::{Notice, SaveOutcome, ScreenState, SpotView};

/// Application state shared across Tauri commands.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<SpotController>,
}

/// Shows notices as native message dialogs.
pub struct DialogNotifier {
    app: AppHandle,
}

impl DialogNotifier {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl Notifier for DialogNotifier {
    fn notify(&self, notice: &Notice) {
        tracing::info!(title = %notice.title, "showing notice");
        self.app
            .dialog()
            .message(notice.message.clone())
            .title(notice.title.clone())
            .kind(MessageDialogKind::Warning)
            .show(|_| {});
    }
}

fn parse_id(id: &str) -> Result<SpotId, String> {
    id.parse::<SpotId>()
        .map_err(|e| format!("Invalid spot id: {}", e))
}

/// Load saved spots from storage. Called once when the screen mounts.
#[tauri::command]
pub async fn load_spots(state: State<'_, AppState>) -> Result<Vec<SpotView>, String> {
    Ok(state.controller.load_spots().await)
}

/// Current screen state (spots plus loading/saving flags).
#[tauri::command]
pub async fn list_spots(state: State<'_, AppState>) -> Result<ScreenState, String> {
    Ok(state.controller.screen().await)
}

/// Save the current location under `name` (blank names get a placeholder).
#[tauri::command]
pub async fn save_current_location(
    name: String,
    state: State<'_, AppState>,
) -> Result<SaveOutcome, String> {
    Ok(state.controller.save_current_location(&name).await)
}

/// Delete a saved spot.
#[tauri::command]
pub async fn remove_spot(id: String, state: State<'_, AppState>) -> Result<(), String> {
    let id = parse_id(&id)?;
    state
        .controller
        .remove_spot(&id)
        .await
        .map_err(|e| format!("Delete failed: {}", e))
}

/// Open driving directions to a saved spot.
#[tauri::command]
pub async fn open_in_maps(
    id: String,
    state: State<'_, AppState>,
) -> Result<NavigationTarget, String> {
    let id = parse_id(&id)?;
    state
        .controller
        .open_in_maps(&id)
        .await
        .map_err(|e| format!("Navigation failed: {}", e))
}
