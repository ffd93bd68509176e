mod bridge;
pub mod chrome;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use serde_json::Value;

use crate::error::TransportError;
use crate::protocol::{FrameId, Request, TabId};

pub use bridge::{decode_reply, from_js, to_js};
pub use chrome::ChromeApi;

/// Everything the popup needs from the browser.
///
/// Replies come back as raw JSON; `Ok(None)` means the receiver answered
/// with nothing. Single-threaded (WASM), hence `?Send`.
#[async_trait(?Send)]
pub trait BrowserApi {
    async fn active_tab(&self) -> Result<TabId, TransportError>;

    /// Request/response round trip with the background process.
    async fn send_to_background(&self, request: &Request) -> Result<Option<Value>, TransportError>;

    /// Fire-and-forget message to the background process.
    fn notify_background(&self, request: &Request);

    async fn send_to_frame(
        &self,
        tab: TabId,
        frame: FrameId,
        request: &Request,
    ) -> Result<Option<Value>, TransportError>;

    /// Inject `files` into every frame of `tab`.
    async fn inject_content_script(&self, tab: TabId, files: &[String]) -> Result<(), TransportError>;

    async fn list_frames(&self, tab: TabId) -> Result<Vec<FrameId>, TransportError>;

    async fn sleep(&self, millis: u32);

    /// Run `task` detached on the local executor; nobody awaits it.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}
