use wasm_bindgen::prelude::*;

pub mod bindings;
pub mod controller;
pub mod dom;
pub mod listeners;

pub use bindings::{panzoom, PanZoom};
pub use controller::ViewportController;
pub use panzoom_core::{ConfigPatch, Notification, PanZoomConfig, Transform};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    // A host page that already installed a logger keeps it.
    let _ = console_log::init_with_level(level);
}
