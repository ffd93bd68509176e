// Background service worker logic for Field Mask
// No Dioxus rendering here; JavaScript glue forwards chrome.runtime.onMessage
// and chrome.tabs.onRemoved into these exports.

use std::cell::RefCell;

use field_mask_extension::protocol::Request;
use field_mask_extension::services::{from_js, to_js};
use field_mask_extension::tab_state::TabStateStore;
use wasm_bindgen::prelude::*;
use web_sys::console;

// Dummy main for binary target
fn main() {}

thread_local! {
    static STORE: RefCell<TabStateStore> = RefCell::new(TabStateStore::new());
}

/// Log helper (no wasm-logger in the worker)
fn log(msg: &str) {
    console::log_1(&JsValue::from_str(msg));
}

#[wasm_bindgen]
pub fn init_background() {
    log("Field Mask background service initialized");
}

/// Handle a runtime message. Returns the reply, or `undefined` when the
/// message needs none (or is not meant for the background).
#[wasm_bindgen]
pub fn handle_message(message: JsValue) -> JsValue {
    let request: Request = match from_js(&message)
        .and_then(|raw| Ok(serde_json::from_value(raw.unwrap_or_default())?))
    {
        Ok(request) => request,
        Err(e) => {
            log(&format!("Ignoring message: {}", e));
            return JsValue::UNDEFINED;
        }
    };

    let kind = request.kind();
    let reply = STORE.with(|store| store.borrow_mut().handle(request));

    match reply.map(|state| to_js(&state)) {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            log(&format!("Cannot encode {} reply: {}", kind, e));
            JsValue::UNDEFINED
        }
        None => JsValue::UNDEFINED,
    }
}

/// Drop the state of a closed tab.
#[wasm_bindgen]
pub fn handle_tab_removed(tab_id: u32) {
    STORE.with(|store| {
        if store.borrow_mut().remove(tab_id).is_some() {
            log(&format!("Forgot state of closed tab {}", tab_id));
        }
    });
}
