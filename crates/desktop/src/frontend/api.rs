//! API bindings using Tauri's invoke system via JavaScript.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::window;

use crate::types::{SaveArgs, SaveOutcome, ScreenState, SpotArgs, SpotView};

/// Helper to invoke Tauri commands from WASM.
///
/// The Tauri API is available via `window.__TAURI__` in Tauri v2 when
/// `withGlobalTauri` is enabled.
async fn invoke_tauri<T>(cmd: &str, args: JsValue) -> Result<T, String>
where
    T: serde::de::DeserializeOwned,
{
    let window = window().ok_or_else(|| "No window object".to_string())?;

    let tauri_obj = js_sys::Reflect::get(&window, &JsValue::from_str("__TAURI__"))
        .map_err(|e| format!("Failed to get __TAURI__: {:?}", e))?;

    let core = js_sys::Reflect::get(&tauri_obj, &JsValue::from_str("core"))
        .map_err(|e| format!("Failed to get core: {:?}", e))?;

    let invoke_fn = js_sys::Reflect::get(&core, &JsValue::from_str("invoke"))
        .map_err(|e| format!("Failed to get invoke: {:?}", e))?;

    let invoke_function = js_sys::Function::from(invoke_fn);
    let promise = invoke_function
        .call2(&core, &JsValue::from_str(cmd), &args)
        .map_err(|e| format!("Failed to call invoke: {:?}", e))?;

    let result = JsFuture::from(js_sys::Promise::from(promise))
        .await
        .map_err(|e| format!("Invoke failed: {:?}", e))?;

    serde_wasm_bindgen::from_value(result)
        .map_err(|e| format!("Failed to deserialize result: {:?}", e))
}

/// Command arguments as a plain JS object; Tauri reads them back as JSON.
fn to_args<T: Serialize>(args: &T) -> Result<JsValue, String> {
    args.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("Failed to serialize args: {:?}", e))
}

/// Load saved spots (once, on mount).
pub async fn load_spots() -> Result<Vec<SpotView>, String> {
    invoke_tauri("load_spots", JsValue::NULL).await
}

/// Current screen state.
pub async fn list_spots() -> Result<ScreenState, String> {
    invoke_tauri("list_spots", JsValue::NULL).await
}

/// Save the current location under an optional name.
pub async fn save_current_location(name: String) -> Result<SaveOutcome, String> {
    invoke_tauri("save_current_location", to_args(&SaveArgs { name })?).await
}

/// Delete a saved spot.
pub async fn remove_spot(id: String) -> Result<(), String> {
    invoke_tauri("remove_spot", to_args(&SpotArgs { id })?).await
}

/// Open driving directions. The backend reports which link it used; the
/// screen does not need it.
pub async fn open_in_maps(id: String) -> Result<(), String> {
    let _: serde_json::Value =
        invoke_tauri("open_in_maps", to_args(&SpotArgs { id })?).await?;
    Ok(())
}
