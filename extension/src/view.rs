// Popup view model
// Pure state + render function; no browser access happens here

pub const STATUS_ACTIVE: &str = "Masking active";
pub const STATUS_INACTIVE: &str = "Click to hide fields";
pub const STATUS_RESTRICTED: &str = "Cannot run on this page";
pub const STATUS_COMM_ERROR: &str = "Communication error. Reload and try again.";

/// Icon shown inside the toggle button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// Fields are masked, the eye is open again
    EyeOpen,
    /// Fields are visible, click to hide them
    EyeSlash,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub has_fields: bool,
}

impl Banner {
    pub fn for_count(count: u32) -> Self {
        let text = match count {
            0 => "No sensitive fields found".to_string(),
            1 => "1 sensitive field detected".to_string(),
            n => format!("{} sensitive fields detected", n),
        };
        Self {
            text,
            has_fields: count > 0,
        }
    }
}

/// Everything the popup renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopupView {
    pub active: bool,
    pub status_text: String,
    pub glyph: Glyph,
    /// `None` until a count has been reported at least once
    pub banner: Option<Banner>,
}

impl Default for PopupView {
    fn default() -> Self {
        Self {
            active: false,
            status_text: STATUS_INACTIVE.to_string(),
            glyph: Glyph::EyeSlash,
            banner: None,
        }
    }
}

impl PopupView {
    pub fn button_class(&self) -> &'static str {
        if self.active {
            "toggle-btn active"
        } else {
            "toggle-btn"
        }
    }

    pub fn ring_class(&self) -> &'static str {
        if self.active {
            "pulse-ring animating"
        } else {
            "pulse-ring"
        }
    }

    pub fn status_class(&self) -> &'static str {
        if self.active {
            "status-text active"
        } else {
            "status-text"
        }
    }

    pub fn info_bar_class(&self) -> &'static str {
        match &self.banner {
            Some(banner) if banner.has_fields => "info-bar has-fields",
            _ => "info-bar",
        }
    }

    /// Replace only the status line, keeping every other element as is.
    pub fn with_status(&self, text: &str) -> Self {
        Self {
            status_text: text.to_string(),
            ..self.clone()
        }
    }
}

/// Next view for the given state. A `None` count keeps the previous banner.
pub fn update_ui(prev: &PopupView, active: bool, count: Option<u32>) -> PopupView {
    PopupView {
        active,
        status_text: if active { STATUS_ACTIVE } else { STATUS_INACTIVE }.to_string(),
        glyph: if active { Glyph::EyeOpen } else { Glyph::EyeSlash },
        banner: match count {
            Some(n) => Some(Banner::for_count(n)),
            None => prev.banner.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_with_no_fields() {
        let view = update_ui(&PopupView::default(), true, Some(0));
        assert!(view.active);
        assert_eq!(view.status_text, "Masking active");
        assert_eq!(view.glyph, Glyph::EyeOpen);
        assert_eq!(view.button_class(), "toggle-btn active");
        assert_eq!(view.ring_class(), "pulse-ring animating");
        assert_eq!(view.status_class(), "status-text active");

        let banner = view.banner.as_ref().unwrap();
        assert_eq!(banner.text, "No sensitive fields found");
        assert!(!banner.has_fields);
        assert_eq!(view.info_bar_class(), "info-bar");
    }

    #[test]
    fn test_banner_pluralization() {
        let one = update_ui(&PopupView::default(), true, Some(1));
        assert_eq!(one.banner.unwrap().text, "1 sensitive field detected");

        let three = update_ui(&PopupView::default(), true, Some(3));
        assert_eq!(three.info_bar_class(), "info-bar has-fields");
        assert_eq!(three.banner.unwrap().text, "3 sensitive fields detected");
    }

    #[test]
    fn test_missing_count_keeps_banner() {
        let prev = update_ui(&PopupView::default(), true, Some(4));
        let next = update_ui(&prev, false, None);

        assert!(!next.active);
        assert_eq!(next.status_text, "Click to hide fields");
        assert_eq!(next.glyph, Glyph::EyeSlash);
        assert_eq!(next.ring_class(), "pulse-ring");
        assert_eq!(next.banner, prev.banner);
    }

    #[test]
    fn test_with_status_only_touches_status() {
        let prev = update_ui(&PopupView::default(), true, Some(2));
        let next = prev.with_status(STATUS_RESTRICTED);
        assert_eq!(next.status_text, "Cannot run on this page");
        assert!(next.active);
        assert_eq!(next.banner, prev.banner);
    }
}
