// chrome.* extension APIs
// Promise-based MV3 calls, bound through wasm-bindgen

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::bridge::{from_js, to_js};
use super::BrowserApi;
use crate::error::TransportError;
use crate::protocol::{FrameId, Request, TabId};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    fn tabs_query(query_info: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = sendMessage)]
    fn tabs_send_message(
        tab_id: u32,
        message: &JsValue,
        options: &JsValue,
    ) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = sendMessage)]
    fn runtime_send_message(message: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "scripting"], js_name = executeScript)]
    fn scripting_execute_script(injection: &JsValue) -> Result<js_sys::Promise, JsValue>;

    // webNavigation is optional; calling it when absent throws and is caught
    #[wasm_bindgen(catch, js_namespace = ["chrome", "webNavigation"], js_name = getAllFrames)]
    fn web_navigation_get_all_frames(details: &JsValue) -> Result<js_sys::Promise, JsValue>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TabQuery {
    active: bool,
    current_window: bool,
}

#[derive(Deserialize)]
struct TabInfo {
    id: Option<TabId>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageOptions {
    frame_id: FrameId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InjectionTarget {
    tab_id: TabId,
    all_frames: bool,
}

#[derive(Serialize)]
struct ScriptInjection<'a> {
    target: InjectionTarget,
    files: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameQuery {
    tab_id: TabId,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrameDetails {
    frame_id: FrameId,
}

async fn call(promise: Result<js_sys::Promise, JsValue>) -> Result<JsValue, TransportError> {
    Ok(JsFuture::from(promise?).await?)
}

/// `BrowserApi` backed by the real extension runtime.
#[derive(Clone, Copy, Default)]
pub struct ChromeApi;

impl ChromeApi {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl BrowserApi for ChromeApi {
    async fn active_tab(&self) -> Result<TabId, TransportError> {
        let query = to_js(&TabQuery {
            active: true,
            current_window: true,
        })?;
        let tabs = from_js(&call(tabs_query(&query)).await?)?;

        let tabs: Vec<TabInfo> = match tabs {
            Some(value) => serde_json::from_value(value)?,
            None => Vec::new(),
        };
        tabs.into_iter()
            .next()
            .and_then(|tab| tab.id)
            .ok_or(TransportError::NoActiveTab)
    }

    async fn send_to_background(&self, request: &Request) -> Result<Option<Value>, TransportError> {
        let message = to_js(request)?;
        from_js(&call(runtime_send_message(&message)).await?)
    }

    fn notify_background(&self, request: &Request) {
        let kind = request.kind();
        let message = match to_js(request) {
            Ok(message) => message,
            Err(e) => {
                log::warn!("Dropping {}: {}", kind, e);
                return;
            }
        };

        let promise = runtime_send_message(&message);
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = call(promise).await {
                log::debug!("{} not delivered: {}", kind, e);
            }
        });
    }

    async fn send_to_frame(
        &self,
        tab: TabId,
        frame: FrameId,
        request: &Request,
    ) -> Result<Option<Value>, TransportError> {
        let message = to_js(request)?;
        let options = to_js(&MessageOptions { frame_id: frame })?;
        from_js(&call(tabs_send_message(tab, &message, &options)).await?)
    }

    async fn inject_content_script(&self, tab: TabId, files: &[String]) -> Result<(), TransportError> {
        let injection = to_js(&ScriptInjection {
            target: InjectionTarget {
                tab_id: tab,
                all_frames: true,
            },
            files,
        })?;
        call(scripting_execute_script(&injection)).await?;
        Ok(())
    }

    async fn list_frames(&self, tab: TabId) -> Result<Vec<FrameId>, TransportError> {
        let details = to_js(&FrameQuery { tab_id: tab })?;
        let reply = call(web_navigation_get_all_frames(&details)).await?;
        let frames: Option<Vec<FrameDetails>> = match from_js(&reply)? {
            Some(value) => serde_json::from_value(value)?,
            None => None,
        };

        Ok(frames
            .unwrap_or_default()
            .into_iter()
            .map(|f| f.frame_id)
            .collect())
    }

    async fn sleep(&self, millis: u32) {
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
