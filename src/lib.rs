//! # debate-ui
//!
//! Leptos + WASM frontend for the debate platform: browsing and creating
//! debates, nested comments with local-first mutations, FOR/AGAINST
//! voting, per-debate real-time chat, notifications, messaging, and user
//! profiles/ranking, all against a REST backend under `/api` and a
//! pub/sub WebSocket endpoint under `/ws`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod store;
pub mod util;

/// Browser entry point: install panic/log hooks and hydrate the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
