//! Browser console logging.
//!
//! Off `wasm32` these are no-ops so native tests stay quiet.

#[cfg(target_arch = "wasm32")]
pub fn info(msg: &str) {
    web_sys::console::info_1(&msg.into());
}

#[cfg(target_arch = "wasm32")]
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&msg.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn info(_msg: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(_msg: &str) {}
