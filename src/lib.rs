//! # analysis-client
//!
//! Leptos + WASM frontend for a clinical/biostatistics analysis platform.
//!
//! This crate contains the REST API client and its wire types, page state
//! models (datasets, profile, wizard, protocol), an undo/redo history, the
//! keyboard shortcut dispatcher, and the pages and components built on them.
//! Browser-only behavior is gated behind the `hydrate` feature so the logic
//! modules build and test natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs logging and hydrates the server-rendered app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
