//! Browser entry point for the `web` feature.
//!
//! Compiled only for `wasm32`. [`start`] runs automatically when the
//! module is instantiated: it wires up panic reporting and logging, then
//! spawns the viewer's event loop, which appends its canvas to the
//! document body. The function returns immediately; the browser drives
//! the loop from then on.

use wasm_bindgen::prelude::wasm_bindgen;

use crate::viewer::Viewer;

/// Module entry point; sets up logging and launches the viewer.
///
/// # Errors
///
/// Returns a JS error if the event loop cannot be created.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if console_log::init_with_level(log::Level::Info).is_err() {
        // A second instantiation keeps the logger from the first.
        log::warn!("logger already initialized");
    }

    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title("teaview");
    }

    Viewer::builder()
        .build()
        .run()
        .map_err(|e| wasm_bindgen::JsValue::from_str(&e.to_string()))
}
