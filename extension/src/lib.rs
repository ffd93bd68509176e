// Field Mask popup
// Rust/WASM popup that toggles masking of sensitive form fields in the
// active tab. The background binary keeps per-tab state.

pub mod config;
pub mod controller;
pub mod error;
pub mod protocol;
pub mod services;
pub mod tab_state;
pub mod view;

#[cfg(feature = "dioxus")]
mod components;
#[cfg(feature = "dioxus")]
pub mod icons;

pub use config::PopupConfig;
pub use controller::{BroadcastReport, ClickOutcome, PopupController, Renderer};
pub use error::TransportError;
pub use protocol::{MaskState, Request, StateReply};
pub use view::{update_ui, PopupView};

#[cfg(feature = "dioxus")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Field Mask popup starting...");
    dioxus::launch(components::Popup);
}
