use std::rc::Rc;

use dioxus::prelude::*;

use crate::config::PopupConfig;
use crate::controller::{ClickOutcome, PopupController, Renderer};
use crate::icons::GlyphIcon;
use crate::services::ChromeApi;
use crate::view::PopupView;

impl Renderer for Signal<PopupView> {
    fn render(&self, view: &PopupView) {
        let mut signal = *self;
        signal.set(view.clone());
    }
}

#[component]
pub fn Popup() -> Element {
    let view = use_signal(PopupView::default);
    let controller =
        use_hook(|| Rc::new(PopupController::new(ChromeApi::new(), view, PopupConfig::default())));

    // Initial load, once per popup session
    let ctl_for_init = controller.clone();
    use_hook(move || {
        spawn(async move {
            ctl_for_init.load_initial_state().await;
        });
    });

    let ctl_for_click = controller.clone();
    let current = view.read().clone();
    let status_text = current.status_text.clone();
    let banner_text = current
        .banner
        .as_ref()
        .map(|b| b.text.clone())
        .unwrap_or_default();

    rsx! {
        div { class: "popup",
            h1 { class: "title", "Field Mask" }

            button {
                id: "toggleBtn",
                class: current.button_class(),
                onclick: move |_| {
                    let ctl = ctl_for_click.clone();
                    spawn(async move {
                        match ctl.handle_click().await {
                            ClickOutcome::Toggled { state, repolled } => {
                                log::debug!("Click done: {:?}, re-poll {:?}", state, repolled)
                            }
                            outcome => log::debug!("Click aborted: {:?}", outcome),
                        }
                    });
                },
                span { class: current.ring_class() }
                span { class: "btn-icon",
                    GlyphIcon { glyph: current.glyph }
                }
            }

            p { id: "statusText", class: current.status_class(), "{status_text}" }

            div { id: "infoBar", class: current.info_bar_class(),
                span { id: "fieldCount", "{banner_text}" }
            }
        }
    }
}
