use wasm_bindgen::prelude::*;

pub mod ai;
pub mod board;
pub mod checkers;
pub mod config;
pub mod error;
pub mod game;
pub mod reversi;
pub mod types;
pub mod wasm;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Routes panics and `log` output to the browser console when the matching
/// features are enabled. Safe to call more than once.
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if let Err(err) = console_log::init_with_level(log::Level::Debug) {
            log::debug!("console logger already installed: {err}");
        }
    }
}
