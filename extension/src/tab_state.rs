// Per-tab masking state held by the background service worker
// In memory only; lost when the worker is torn down

use std::collections::HashMap;

use crate::protocol::{MaskState, Request, TabId};

#[derive(Debug, Default)]
pub struct TabStateStore {
    tabs: HashMap<TabId, MaskState>,
}

impl TabStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tab: TabId) -> MaskState {
        self.tabs.get(&tab).copied().unwrap_or_default()
    }

    pub fn set(&mut self, tab: TabId, state: MaskState) {
        self.tabs.insert(tab, state);
    }

    /// Forget a closed tab.
    pub fn remove(&mut self, tab: TabId) -> Option<MaskState> {
        self.tabs.remove(&tab)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Answer a popup request. Only `GET_STATE` produces a reply;
    /// content-script messages are not ours to answer.
    pub fn handle(&mut self, request: Request) -> Option<MaskState> {
        match request {
            Request::GetState { tab_id } => Some(self.get(tab_id)),
            Request::SetState {
                tab_id,
                active,
                field_count,
            } => {
                // A toggle reply without a count keeps the last known one
                let count = field_count.unwrap_or_else(|| self.get(tab_id).field_count);
                self.set(tab_id, MaskState::new(active, count));
                None
            }
            Request::Ping | Request::Toggle | Request::GetCount => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::StateReply;

    #[test]
    fn test_unknown_tab_is_inactive() {
        let mut store = TabStateStore::new();
        assert_eq!(
            store.handle(Request::GetState { tab_id: 1 }),
            Some(MaskState::default())
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_then_get() {
        let mut store = TabStateStore::new();
        assert_eq!(store.handle(Request::set_state(3, StateReply::new(true, Some(4)))), None);
        assert_eq!(store.handle(Request::set_state(3, StateReply::new(true, Some(6)))), None);

        assert_eq!(store.get(3), MaskState::new(true, 6));
        assert_eq!(store.get(4), MaskState::default());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_without_count_keeps_previous_count() {
        let mut store = TabStateStore::new();
        store.set(5, MaskState::new(true, 3));

        store.handle(Request::set_state(5, StateReply::new(false, None)));
        assert_eq!(store.get(5), MaskState::new(false, 3));

        store.handle(Request::set_state(8, StateReply::new(true, None)));
        assert_eq!(store.get(8), MaskState::new(true, 0));
    }

    #[test]
    fn test_remove_closed_tab() {
        let mut store = TabStateStore::new();
        store.set(9, MaskState::new(true, 1));
        assert_eq!(store.remove(9), Some(MaskState::new(true, 1)));
        assert_eq!(store.remove(9), None);
        assert_eq!(store.get(9), MaskState::default());
    }

    #[test]
    fn test_ignores_content_script_messages() {
        let mut store = TabStateStore::new();
        assert_eq!(store.handle(Request::Toggle), None);
        assert_eq!(store.handle(Request::Ping), None);
        assert!(store.is_empty());
    }
}
