//! `savemyspot-desktop`
//!
//! **Responsibility:** the single-screen application shell.
//!
//! This crate provides:
//! - The screen controller (load, save current location, delete, navigate)
//! - Display types shared with the WASM frontend
//! - Tauri commands and the app entry point (feature `tauri`)
//!
//! The shell stays thin: all persistence rules live in `savemyspot-infra`.

pub mod types;

#[cfg(not(target_arch = "wasm32"))]
pub mod controller;
#[cfg(not(target_arch = "wasm32"))]
pub mod notifier;

#[cfg(all(feature = "tauri", not(target_arch = "wasm32")))]
pub mod app;
#[cfg(all(feature = "tauri", not(target_arch = "wasm32")))]
pub mod commands;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

pub use types::{Notice, SaveOutcome, ScreenState, SpotView};

#[cfg(not(target_arch = "wasm32"))]
pub use controller::{ControllerError, SpotController};
#[cfg(not(target_arch = "wasm32"))]
pub use notifier::{LogNotifier, Notifier};
