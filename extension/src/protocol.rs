// Messages exchanged between popup, background and content script
// Wire form: JS object with a `type` tag and camelCase fields

use serde::{Deserialize, Serialize};

pub type TabId = u32;
pub type FrameId = u32;

/// Masking state of a single tab, owned by the background process.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaskState {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub field_count: u32,
}

impl MaskState {
    pub fn new(active: bool, field_count: u32) -> Self {
        Self {
            active,
            field_count,
        }
    }
}

/// `TOGGLE`/`GET_STATE` reply as the popup reads it. A missing count
/// stays `None` so the banner is left as it was.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StateReply {
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub field_count: Option<u32>,
}

impl StateReply {
    pub fn new(active: bool, field_count: Option<u32>) -> Self {
        Self {
            active,
            field_count,
        }
    }
}

impl From<MaskState> for StateReply {
    fn from(state: MaskState) -> Self {
        Self::new(state.active, Some(state.field_count))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    // popup -> background
    #[serde(rename_all = "camelCase")]
    GetState { tab_id: TabId },
    #[serde(rename_all = "camelCase")]
    SetState {
        tab_id: TabId,
        active: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field_count: Option<u32>,
    },

    // popup -> content script
    Ping,
    Toggle,
    GetCount,
}

impl Request {
    pub fn set_state(tab_id: TabId, state: StateReply) -> Self {
        Request::SetState {
            tab_id,
            active: state.active,
            field_count: state.field_count,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Request::GetState { .. } => "GET_STATE",
            Request::SetState { .. } => "SET_STATE",
            Request::Ping => "PING",
            Request::Toggle => "TOGGLE",
            Request::GetCount => "GET_COUNT",
        }
    }
}

/// Reply to `PING`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pong {
    #[serde(default)]
    pub pong: bool,
}

/// Reply to `GET_COUNT`. The content script may answer without a count.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CountReply {
    #[serde(default)]
    pub field_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let msg = serde_json::to_value(Request::set_state(7, StateReply::new(true, Some(3)))).unwrap();
        assert_eq!(
            msg,
            json!({ "type": "SET_STATE", "tabId": 7, "active": true, "fieldCount": 3 })
        );

        // No count known: the key is left out, as the content script sent it
        let msg = serde_json::to_value(Request::set_state(7, StateReply::new(true, None))).unwrap();
        assert_eq!(msg, json!({ "type": "SET_STATE", "tabId": 7, "active": true }));

        let msg = serde_json::to_value(Request::GetState { tab_id: 42 }).unwrap();
        assert_eq!(msg, json!({ "type": "GET_STATE", "tabId": 42 }));

        let msg = serde_json::to_value(Request::Ping).unwrap();
        assert_eq!(msg, json!({ "type": "PING" }));
    }

    #[test]
    fn test_parse_incoming_request() {
        let req: Request =
            serde_json::from_value(json!({ "type": "GET_COUNT", "extra": 1 })).unwrap();
        assert_eq!(req, Request::GetCount);
        assert_eq!(req.kind(), "GET_COUNT");

        let bad = serde_json::from_value::<Request>(json!({ "type": "EXPLODE" }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_replies_tolerate_missing_fields() {
        let state: MaskState = serde_json::from_value(json!({ "active": true })).unwrap();
        assert_eq!(state, MaskState::new(true, 0));

        let reply: StateReply = serde_json::from_value(json!({ "active": true })).unwrap();
        assert_eq!(reply, StateReply::new(true, None));
        assert_eq!(StateReply::from(MaskState::new(false, 4)), StateReply::new(false, Some(4)));

        let pong: Pong = serde_json::from_value(json!({})).unwrap();
        assert!(!pong.pong);

        let count: CountReply = serde_json::from_value(json!({ "fieldCount": null })).unwrap();
        assert_eq!(count.field_count, None);
        let count: CountReply = serde_json::from_value(json!({ "fieldCount": 5 })).unwrap();
        assert_eq!(count.field_count, Some(5));
    }
}
