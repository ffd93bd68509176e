use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure of a cross-context call (tabs, runtime, scripting).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("browser call failed: {0}")]
    Js(String),

    #[error("malformed reply: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no active tab")]
    NoActiveTab,
}

impl From<JsValue> for TransportError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        TransportError::Js(message)
    }
}
