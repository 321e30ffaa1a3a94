//! # client
//!
//! Leptos + WASM frontend for Billettigue, the transport ticket-booking site.
//!
//! The interesting part is `session`: the credential store over Web Storage,
//! the role guard, redirect routing, logout and the profile menu model. The
//! remaining modules are the pages and components that put it on screen.

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("console logger not installed: {e}").into());
    }
    leptos::mount::hydrate_body(app::App);
}
