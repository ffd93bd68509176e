use crate::protocol::FrameId;

/// Popup runtime settings. Defaults match the shipped manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopupConfig {
    /// Delay before re-polling the field count after masking is switched on
    pub repoll_delay_ms: u32,
    /// Scripts injected when the content script does not answer `PING`
    pub content_scripts: Vec<String>,
    pub main_frame: FrameId,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            repoll_delay_ms: 600,
            content_scripts: vec!["content.js".to_string()],
            main_frame: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PopupConfig::default();
        assert_eq!(config.repoll_delay_ms, 600);
        assert_eq!(config.content_scripts, vec!["content.js"]);
        assert_eq!(config.main_frame, 0);
    }
}
