//! Browser SPA for the session-auth API.
//!
//! ARCHITECTURE
//! ============
//! `net` talks HTTP, `state` holds the reactive current user, `router` gates
//! navigation, and `pages` render the screens. Only the `csr` build mounts
//! anything; native builds exist for tests.

#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod net;
pub mod pages;
pub mod router;
pub mod state;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
