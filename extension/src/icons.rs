// Eye icons for the toggle button
// SVG inlined, same stroke settings as the Lucide set

use dioxus::prelude::*;

use crate::view::Glyph;

#[component]
pub fn Eye(class: Option<String>) -> Element {
    rsx! {
        svg {
            class: "{class.unwrap_or_default()}",
            xmlns: "http://www.w3.org/2000/svg",
            width: "24",
            height: "24",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "2",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            path { d: "M1 12s4-8 11-8 11 8 11 8-4 8-11 8-11-8-11-8z" }
            circle { cx: "12", cy: "12", r: "3" }
        }
    }
}

#[component]
pub fn EyeOff(class: Option<String>) -> Element {
    rsx! {
        svg {
            class: "{class.unwrap_or_default()}",
            xmlns: "http://www.w3.org/2000/svg",
            width: "24",
            height: "24",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "2",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            path { d: "M17.94 17.94A10.07 10.07 0 0112 20c-7 0-11-8-11-8a18.45 18.45 0 015.06-5.94" }
            path { d: "M9.9 4.24A9.12 9.12 0 0112 4c7 0 11 8 11 8a18.5 18.5 0 01-2.16 3.19" }
            line { x1: "1", y1: "1", x2: "23", y2: "23" }
        }
    }
}

/// Icon for the current glyph.
#[component]
pub fn GlyphIcon(glyph: Glyph, class: Option<String>) -> Element {
    match glyph {
        Glyph::EyeOpen => rsx! { Eye { class } },
        Glyph::EyeSlash => rsx! { EyeOff { class } },
    }
}
