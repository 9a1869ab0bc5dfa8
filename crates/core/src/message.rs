use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::nanoid;

/// Client-generated message identifier, never reused within a list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Draws a fresh random identifier.
    pub fn generate() -> Self {
        Self(nanoid())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// What a list row renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum MessageDisplay {
    /// Echo of one item the user typed.
    User(String),
    /// Placeholder shown until the assistant answers.
    Spinner,
    /// Final assistant content.
    Assistant(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub display: MessageDisplay,
}

impl Message {
    pub fn new(id: MessageId, display: MessageDisplay) -> Self {
        Self { id, display }
    }

    pub fn user(id: MessageId, text: impl Into<String>) -> Self {
        Self::new(id, MessageDisplay::User(text.into()))
    }

    pub fn spinner(id: MessageId) -> Self {
        Self::new(id, MessageDisplay::Spinner)
    }

    pub fn assistant(id: MessageId, text: impl Into<String>) -> Self {
        Self::new(id, MessageDisplay::Assistant(text.into()))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.display, MessageDisplay::Spinner)
    }

    /// Text content, empty for placeholders.
    pub fn text(&self) -> &str {
        match &self.display {
            MessageDisplay::User(text) | MessageDisplay::Assistant(text) => text,
            MessageDisplay::Spinner => "",
        }
    }
}
