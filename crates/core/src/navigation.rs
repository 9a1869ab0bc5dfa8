use std::sync::Arc;

use crate::ai_state::AiStateHandle;
use crate::submission::NewConversation;

pub const NEW_CHAT_PATH: &str = "/new";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
const CONVERSATION_PREFIX: &str = "list/";

/// Path of a persisted conversation.
pub fn conversation_path(chat_id: &str) -> String {
    format!("{CONVERSATION_PREFIX}{chat_id}")
}

/// Navigation targets known to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    New,
    Login,
    Signup,
    Conversation(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::New => NEW_CHAT_PATH.to_string(),
            Self::Login => LOGIN_PATH.to_string(),
            Self::Signup => SIGNUP_PATH.to_string(),
            Self::Conversation(chat_id) => conversation_path(chat_id),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        match trimmed {
            NEW_CHAT_PATH => return Some(Self::New),
            LOGIN_PATH => return Some(Self::Login),
            SIGNUP_PATH => return Some(Self::Signup),
            _ => {}
        }

        let chat_id = trimmed
            .trim_start_matches('/')
            .strip_prefix(CONVERSATION_PREFIX)?;
        if chat_id.is_empty() || chat_id.contains('/') {
            return None;
        }
        Some(Self::Conversation(chat_id.to_string()))
    }
}

/// Location capability injected into the submission pipeline.
pub trait Navigator: Send + Sync {
    /// Rewrites the current location without adding a history entry.
    fn replace_path(&self, path: &str);
    /// Forces a full reload of the current location.
    fn reload(&self);
}

/// Moves the view to a freshly created conversation.
#[derive(Clone)]
pub struct NavigationSettler {
    navigator: Arc<dyn Navigator>,
    ai_state: AiStateHandle,
}

impl NavigationSettler {
    pub fn new(navigator: Arc<dyn Navigator>, ai_state: AiStateHandle) -> Self {
        Self {
            navigator,
            ai_state,
        }
    }

    /// Applies a completion signal; returns whether navigation happened.
    ///
    /// The conversation id is read when the signal arrives, not when the
    /// submission started.
    pub fn settle(&self, signal: Option<NewConversation>) -> bool {
        if signal.is_none() {
            return false;
        }

        let path = conversation_path(&self.ai_state.chat_id());
        tracing::info!(path = %path, "new conversation created, reloading");
        self.navigator.replace_path(&path);
        self.navigator.reload();
        true
    }
}
