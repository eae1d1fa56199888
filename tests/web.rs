//! Browser-only checks for the page host. Run with `wasm-pack test --headless`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use nucaloric_term::components::terminal::BrowserHost;
use nucaloric_term::core::TerminalHost;
use nucaloric_term::models::AppLink;
use nucaloric_term::utils::dom;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn persist_flag_writes_local_storage() {
    let mut host = BrowserHost;
    host.persist_flag("nucaloric_test_flag", "true")
        .expect("localStorage is available in the test browser");

    let storage = dom::local_storage().expect("localStorage");
    let stored = storage.get_item("nucaloric_test_flag").ok().flatten();
    assert_eq!(stored.as_deref(), Some("true"));
    let _ = storage.remove_item("nucaloric_test_flag");
}

#[wasm_bindgen_test]
fn navigate_sets_hash_route() {
    let mut host = BrowserHost;
    let link = AppLink::scene("main").with_tab("profile");
    assert!(host.navigate(&link));

    let hash = dom::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    assert_eq!(hash, "#/main/profile");
}
