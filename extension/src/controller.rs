// Popup controller
// Drives the popup: background state lookup, content script injection,
// toggling, delayed re-poll. Rendering goes through `view::update_ui`.

use std::cell::{Cell, RefCell};

use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::PopupConfig;
use crate::error::TransportError;
use crate::protocol::{CountReply, FrameId, Pong, Request, StateReply, TabId};
use crate::services::{decode_reply, BrowserApi};
use crate::view::{self, PopupView, STATUS_COMM_ERROR, STATUS_RESTRICTED};

/// Sink for rendered views (a Dioxus signal in the popup, a recorder in tests).
pub trait Renderer {
    fn render(&self, view: &PopupView);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Content script could not be injected (restricted page or no tab)
    Restricted,
    /// Main frame did not answer `TOGGLE`
    CommunicationError,
    Toggled {
        state: StateReply,
        /// Count from the delayed re-poll, if it ran and answered
        repolled: Option<u32>,
    },
}

/// Result of the advisory `TOGGLE` fan-out to sub-frames.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: Vec<FrameId>,
    pub failed: Vec<(FrameId, String)>,
}

pub struct PopupController<B, R> {
    browser: B,
    renderer: R,
    config: PopupConfig,
    view: RefCell<PopupView>,
    // Bumped on every click; a delayed re-poll from an older click is dropped,
    // and so is an initial load that finishes after the first click
    generation: Cell<u64>,
}

/// Collapse a transport result into a typed reply, logging failures.
fn settle<T: DeserializeOwned>(
    kind: &str,
    result: Result<Option<Value>, TransportError>,
) -> Option<T> {
    match result.and_then(decode_reply) {
        Ok(reply) => reply,
        Err(e) => {
            log::warn!("{} failed: {}", kind, e);
            None
        }
    }
}

/// `TOGGLE` every frame of `tab` except `main_frame`, collecting per-frame results.
async fn broadcast<B: BrowserApi>(browser: &B, tab: TabId, main_frame: FrameId) -> BroadcastReport {
    let frames = match browser.list_frames(tab).await {
        Ok(frames) => frames,
        Err(e) => {
            log::debug!("Frame listing unavailable: {}", e);
            return BroadcastReport::default();
        }
    };

    let sends = frames
        .into_iter()
        .filter(|frame| *frame != main_frame)
        .map(|frame| async move {
            let result = browser.send_to_frame(tab, frame, &Request::Toggle).await;
            (frame, result)
        });

    let mut report = BroadcastReport::default();
    for (frame, result) in join_all(sends).await {
        match result {
            Ok(_) => report.delivered.push(frame),
            Err(e) => report.failed.push((frame, e.to_string())),
        }
    }
    report
}

impl<B: BrowserApi + Clone + 'static, R: Renderer> PopupController<B, R> {
    pub fn new(browser: B, renderer: R, config: PopupConfig) -> Self {
        Self {
            browser,
            renderer,
            config,
            view: RefCell::new(PopupView::default()),
            generation: Cell::new(0),
        }
    }

    pub fn view(&self) -> PopupView {
        self.view.borrow().clone()
    }

    fn apply(&self, next: PopupView) {
        self.renderer.render(&next);
        *self.view.borrow_mut() = next;
    }

    pub fn update_ui(&self, active: bool, count: Option<u32>) {
        let next = view::update_ui(&self.view.borrow(), active, count);
        self.apply(next);
    }

    fn show_status(&self, text: &str) {
        let next = self.view.borrow().with_status(text);
        self.apply(next);
    }

    /// Render whatever the background remembers for the active tab.
    /// Skipped when a click has already taken over the popup.
    pub async fn load_initial_state(&self) -> StateReply {
        let state = match self.browser.active_tab().await {
            Ok(tab) => self.fetch_state(tab).await,
            Err(e) => {
                log::warn!("Active tab lookup failed: {}", e);
                StateReply::new(false, Some(0))
            }
        };

        if self.generation.get() != 0 {
            log::debug!("Initial state arrived after a click, not rendering it");
            return state;
        }

        log::info!(
            "Initial state: active={}, fields={:?}",
            state.active,
            state.field_count
        );
        self.update_ui(state.active, state.field_count);
        state
    }

    /// `GET_STATE` for `tab`; no answer means masking is off with no fields.
    pub async fn fetch_state(&self, tab: TabId) -> StateReply {
        let request = Request::GetState { tab_id: tab };
        let reply = self.browser.send_to_background(&request).await;
        settle::<StateReply>(request.kind(), reply).unwrap_or(StateReply::new(false, Some(0)))
    }

    /// Make sure the content script answers in `tab`, injecting it if needed.
    /// `false` means the page does not allow scripting.
    pub async fn ensure_injected(&self, tab: TabId) -> bool {
        let reply = self
            .browser
            .send_to_frame(tab, self.config.main_frame, &Request::Ping)
            .await;

        if settle::<Pong>("PING", reply).is_some_and(|p| p.pong) {
            return true;
        }

        log::debug!("No content script in tab {}, injecting", tab);
        match self
            .browser
            .inject_content_script(tab, &self.config.content_scripts)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Injection into tab {} failed: {}", tab, e);
                false
            }
        }
    }

    /// Toggle the main frame. Sub-frames get a detached best-effort
    /// `TOGGLE`; their replies are never waited for.
    pub async fn toggle(&self, tab: TabId) -> Option<StateReply> {
        let browser = self.browser.clone();
        let main_frame = self.config.main_frame;
        self.browser.spawn(Box::pin(async move {
            let report = broadcast(&browser, tab, main_frame).await;
            if !report.failed.is_empty() {
                log::debug!(
                    "TOGGLE reached {} sub-frame(s), {} failed",
                    report.delivered.len(),
                    report.failed.len()
                );
            }
        }));

        let reply = self
            .browser
            .send_to_frame(tab, main_frame, &Request::Toggle)
            .await;
        settle::<StateReply>("TOGGLE", reply)
    }

    /// Best-effort `TOGGLE` to every non-main frame. Never fails.
    pub async fn broadcast_toggle(&self, tab: TabId) -> BroadcastReport {
        broadcast(&self.browser, tab, self.config.main_frame).await
    }

    fn begin_click(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    /// Button click: inject, toggle, persist, render, then re-poll once.
    pub async fn handle_click(&self) -> ClickOutcome {
        let generation = self.begin_click();

        let tab = match self.browser.active_tab().await {
            Ok(tab) => tab,
            Err(e) => {
                log::warn!("Click without a usable tab: {}", e);
                self.show_status(STATUS_RESTRICTED);
                return ClickOutcome::Restricted;
            }
        };

        if !self.ensure_injected(tab).await {
            self.show_status(STATUS_RESTRICTED);
            return ClickOutcome::Restricted;
        }

        let Some(state) = self.toggle(tab).await else {
            self.show_status(STATUS_COMM_ERROR);
            return ClickOutcome::CommunicationError;
        };

        log::info!(
            "Tab {} masking {} ({:?} fields)",
            tab,
            if state.active { "on" } else { "off" },
            state.field_count
        );
        self.browser.notify_background(&Request::set_state(tab, state));
        self.update_ui(state.active, state.field_count);

        let repolled = if state.active {
            self.browser.sleep(self.config.repoll_delay_ms).await;
            self.repoll(tab, state, generation).await
        } else {
            None
        };

        ClickOutcome::Toggled { state, repolled }
    }

    /// Ask the main frame for a fresh count (lazy-loaded fields) and push it.
    async fn repoll(&self, tab: TabId, state: StateReply, generation: u64) -> Option<u32> {
        if !self.is_current(generation) {
            log::debug!("Skipping re-poll superseded by a newer click");
            return None;
        }

        let reply = self
            .browser
            .send_to_frame(tab, self.config.main_frame, &Request::GetCount)
            .await;
        let count = settle::<CountReply>("GET_COUNT", reply)?.field_count?;

        if !self.is_current(generation) {
            log::debug!("Dropping stale count {} for tab {}", count, tab);
            return None;
        }

        self.update_ui(state.active, Some(count));
        self.browser
            .notify_background(&Request::set_state(tab, StateReply::new(state.active, Some(count))));
        Some(count)
    }
}
