//! DOM and Web API helpers.

use wasm_bindgen::JsCast;
use web_sys::{Storage, Window};

use crate::core::error::HostError;

#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Store `value` under `key` in localStorage.
pub fn store_flag(key: &str, value: &str) -> Result<(), HostError> {
    let storage = local_storage().ok_or(HostError::StorageUnavailable)?;
    storage
        .set_item(key, value)
        .map_err(|_| HostError::SaveFailed(key.to_string()))
}

/// Reload the current page.
pub fn reload_page() {
    if let Some(window) = window() {
        let _ = window.location().reload();
    }
}

/// Focus an element by CSS selector.
///
/// Returns `true` if the element was found and focused.
pub fn focus_element(selector: &str) -> bool {
    if let Some(window) = window()
        && let Some(document) = window.document()
        && let Some(element) = document.query_selector(selector).ok().flatten()
        && let Ok(html_element) = element.dyn_into::<web_sys::HtmlElement>()
    {
        html_element.focus().is_ok()
    } else {
        false
    }
}
