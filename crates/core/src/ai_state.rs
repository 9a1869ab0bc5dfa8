use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

use crate::ids::nanoid;

/// Ambient conversation state shared between the client and the assistant service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiState {
    pub chat_id: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl AiState {
    pub fn new(chat_id: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            items: Vec::new(),
        }
    }

    /// Fresh conversation with a generated identifier.
    pub fn new_chat() -> Self {
        Self::new(nanoid())
    }

    /// A conversation is new until its first item is recorded.
    pub fn is_new(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cloneable handle that always reads the latest [`AiState`].
#[derive(Clone)]
pub struct AiStateHandle {
    state: Arc<ArcSwap<AiState>>,
}

impl AiStateHandle {
    pub fn new(state: AiState) -> Self {
        Self {
            state: Arc::new(ArcSwap::from_pointee(state)),
        }
    }

    pub fn load(&self) -> Arc<AiState> {
        self.state.load_full()
    }

    pub fn chat_id(&self) -> String {
        self.state.load().chat_id.clone()
    }

    pub fn store(&self, state: AiState) {
        self.state.store(Arc::new(state));
    }

    /// Records items for `chat_id` and reports whether that conversation was new before.
    ///
    /// A restart since the submission began leaves the fresh conversation untouched
    /// and reports `false`.
    pub fn record_items(&self, chat_id: &str, items: &[String]) -> bool {
        let previous = self.state.rcu(|current| {
            if current.chat_id != chat_id {
                return Arc::clone(current);
            }
            let mut next = AiState::clone(current);
            next.items.extend(items.iter().cloned());
            Arc::new(next)
        });
        previous.chat_id == chat_id && previous.is_new()
    }

    /// Starts over with a fresh conversation identifier.
    pub fn restart(&self) -> String {
        let state = AiState::new_chat();
        let chat_id = state.chat_id.clone();
        self.store(state);
        chat_id
    }
}

impl Default for AiStateHandle {
    fn default() -> Self {
        Self::new(AiState::new_chat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_recorded_items_mark_conversation_as_new() {
        let handle = AiStateHandle::new(AiState::new("chat-1"));

        assert!(handle.record_items("chat-1", &["milk".to_string()]));
        assert!(!handle.record_items("chat-1", &["eggs".to_string()]));
        assert_eq!(handle.load().items, vec!["milk", "eggs"]);
    }

    #[test]
    fn restart_issues_a_new_identifier() {
        let handle = AiStateHandle::new(AiState::new("chat-1"));
        handle.record_items("chat-1", &["milk".to_string()]);

        let chat_id = handle.restart();
        assert_eq!(handle.chat_id(), chat_id);
        assert!(handle.load().is_new());
        assert_ne!(chat_id, "chat-1");
    }

    #[test]
    fn items_from_a_restarted_conversation_are_not_recorded() {
        let handle = AiStateHandle::new(AiState::new("chat-1"));
        let chat_id = handle.restart();

        assert!(!handle.record_items("chat-1", &["milk".to_string()]));
        assert!(handle.load().is_new());
        assert!(handle.record_items(&chat_id, &["eggs".to_string()]));
    }
}
