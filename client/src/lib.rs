//! # client
//!
//! Leptos + WASM frontend for the fabric process pipeline.
//!
//! Renders one tab per production stage, builds model-backed forms from the
//! backend schema, requests predictions, carries values forward between
//! stages, logs pipeline snapshots, and shows the run history.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
