//! WebAssembly entry point.

use wasm_bindgen::prelude::*;

/// Install the panic hook and the console logger.
#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("domkit: logger already set: {}", err).into());
    }

    log::info!("domkit {} ready", env!("CARGO_PKG_VERSION"));
}
