//! Tauri application wiring, shared by the desktop binary and mobile targets.

use std::sync::Arc;

use anyhow::Context;
use savemyspot_infra::AppConfig;
use tauri::Manager;

use crate::commands::{self, AppState, DialogNotifier};
use crate::controller::SpotController;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    savemyspot_observability::init();

    if let Err(err) = try_run() {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}

fn try_run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(db_path = %config.db_path.display(), "starting Save My Spot");

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(move |app| {
            let notifier = Arc::new(DialogNotifier::new(app.handle().clone()));
            let controller = Arc::new(SpotController::from_config(&config, notifier));
            app.manage(AppState { controller });
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::load_spots,
            commands::list_spots,
            commands::save_current_location,
            commands::remove_spot,
            commands::open_in_maps,
        ])
        .run(tauri::generate_context!())
        .context("error while running tauri application")
}
