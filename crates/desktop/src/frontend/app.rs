//! The single "Save My Spot" screen.

use leptos::*;

use crate::frontend::api;
use crate::types::{EMPTY_LIST_TEXT, SaveOutcome, SpotView};

fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let spots = create_rw_signal(Vec::<SpotView>::new());
    let spot_name = create_rw_signal(String::new());
    let loading = create_rw_signal(true);
    let saving = create_rw_signal(false);

    // Initial load; failures are reported by the backend as a dialog.
    spawn_local(async move {
        match api::load_spots().await {
            Ok(loaded) => spots.set(loaded),
            Err(e) => alert(&format!("Load failed: {}", e)),
        }
        loading.set(false);
    });

    let refresh = move || {
        spawn_local(async move {
            if let Ok(screen) = api::list_spots().await {
                spots.set(screen.spots);
            }
        });
    };

    let save = move |_| {
        if saving.get() {
            return;
        }
        saving.set(true);
        let name = spot_name.get();

        spawn_local(async move {
            match api::save_current_location(name).await {
                Ok(SaveOutcome::Saved(view)) => {
                    spots.update(|list| list.insert(0, view));
                    spot_name.set(String::new());
                }
                Ok(_) => {}
                Err(e) => alert(&format!("Save failed: {}", e)),
            }
            saving.set(false);
        });
    };

    view! {
        <div class="app">
            <header>
                <h1>"Save My Spot"</h1>
                <p class="subtitle">
                    "Save your current location and navigate there with Google Maps."
                </p>
            </header>

            <div class="input-row">
                <input
                    type="text"
                    placeholder="Spot name (optional)"
                    prop:value=move || spot_name.get()
                    on:input=move |ev| spot_name.set(event_target_value(&ev))
                />
                <button on:click=save disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </button>
            </div>

            <main>
                {move || {
                    if loading.get() {
                        view! { <div class="loader">"Loading..."</div> }.into_view()
                    } else if spots.get().is_empty() {
                        view! { <p class="empty">{EMPTY_LIST_TEXT}</p> }.into_view()
                    } else {
                        spots
                            .get()
                            .into_iter()
                            .map(|spot| view! { <SpotCard spot=spot on_change=refresh/> })
                            .collect_view()
                    }
                }}
            </main>
        </div>
    }
}

/// One saved spot with delete and navigate actions.
#[component]
fn SpotCard<F>(spot: SpotView, on_change: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let delete_id = spot.id.clone();
    let navigate_id = spot.id.clone();

    view! {
        <div class="card">
            <div class="card-top">
                <span class="card-title">{spot.name.clone()}</span>
                <button
                    class="delete"
                    on:click=move |_| {
                        let id = delete_id.clone();
                        spawn_local(async move {
                            // The backend already showed "Delete failed".
                            let _ = api::remove_spot(id).await;
                            on_change();
                        });
                    }
                >
                    "Delete"
                </button>
            </div>
            <p class="coordinates">{spot.coordinates.clone()}</p>
            <p class="date">{spot.saved.clone()}</p>
            <button
                class="navigate"
                on:click=move |_| {
                    let id = navigate_id.clone();
                    spawn_local(async move {
                        let _ = api::open_in_maps(id).await;
                    });
                }
            >
                "Navigate in Google Maps"
            </button>
        </div>
    }
}
