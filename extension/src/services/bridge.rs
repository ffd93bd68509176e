// serde <-> JsValue conversion through JSON

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsValue;

use crate::error::TransportError;

pub fn to_js<T: Serialize>(value: &T) -> Result<JsValue, TransportError> {
    let json = serde_json::to_string(value)?;
    Ok(js_sys::JSON::parse(&json)?)
}

/// `undefined`/`null` map to `None`.
pub fn from_js(value: &JsValue) -> Result<Option<Value>, TransportError> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }

    let json = js_sys::JSON::stringify(value)?
        .as_string()
        .ok_or_else(|| TransportError::Js("reply is not serializable".to_string()))?;

    Ok(Some(serde_json::from_str(&json)?))
}

/// Decode an optional raw reply into a typed one.
pub fn decode_reply<T: DeserializeOwned>(reply: Option<Value>) -> Result<Option<T>, TransportError> {
    match reply {
        Some(Value::Null) | None => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{CountReply, MaskState};
    use serde_json::json;

    #[test]
    fn test_decode_reply() {
        let state: Option<MaskState> =
            decode_reply(Some(json!({ "active": true, "fieldCount": 2 }))).unwrap();
        assert_eq!(state, Some(MaskState::new(true, 2)));

        let none: Option<MaskState> = decode_reply(None).unwrap();
        assert!(none.is_none());

        let null: Option<CountReply> = decode_reply(Some(Value::Null)).unwrap();
        assert!(null.is_none());
    }

    #[test]
    fn test_decode_reply_rejects_wrong_shape() {
        let err = decode_reply::<MaskState>(Some(json!("pong"))).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }
}
