// Browser tests for mounting the widget (`wasm-pack test --headless --chrome`).
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn mounted_roots() -> u32 {
    let doc = web_sys::window().unwrap().document().unwrap();
    doc.query_selector_all(".vc-root").unwrap().length()
}

// A rejected mount leaves nothing behind, so the next attempt mounts cleanly.
#[wasm_bindgen_test]
fn failed_mount_does_not_block_a_retry() {
    assert!(valentine_cat::start_app_with_config(r#"{ "accept_images": [] }"#).is_err());
    assert_eq!(mounted_roots(), 0);

    valentine_cat::start_app().unwrap();
    assert_eq!(mounted_roots(), 1);

    assert!(valentine_cat::start_app().is_err());
    assert_eq!(mounted_roots(), 1);
}
