//! # cycletrack
//!
//! Leptos + WASM frontend for tracking menstrual cycles and symptoms,
//! rendered entirely in the browser.
//!
//! Pages capture form input and call thin services over the REST backend;
//! the auth service mirrors the session into `localStorage`, and the cycle
//! data hook keeps dashboard state in sync with the server.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: mount the app into `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already initialised: {e}");
    }
    leptos::mount::mount_to_body(app::App);
}
