#![deny(unsafe_code)]

/// Framework-independent core of the shopping-list chat client.
///
/// Everything here is free of UI types so the gpui client and the tests can
/// drive the same submission pipeline.
pub mod ai_state;
/// Session and token shapes exchanged with the auth provider.
pub mod auth;
pub mod debounce;
pub mod error;
pub mod header;
pub mod ids;
pub mod input;
/// Message entities rendered by the chat list.
pub mod message;
pub mod navigation;
pub mod notice;
/// Submission pipeline: optimistic append, submit, reconcile, settle.
pub mod prompt;
pub mod reconcile;
pub mod result;
pub mod store;
pub mod submission;

pub use ai_state::{AiState, AiStateHandle};
pub use auth::{AuthConfig, AuthPages, Session, SessionProvider, SessionUser, Token};
pub use debounce::{DEFAULT_SUBMIT_DEBOUNCE, Debouncer};
pub use error::{ChatError, ChatResult};
pub use header::HeaderNav;
pub use ids::{ID_ALPHABET, ID_LENGTH, nanoid};
pub use input::split_items;
pub use message::{Message, MessageDisplay, MessageId};
pub use navigation::{NavigationSettler, Navigator, Route, conversation_path};
pub use notice::{Notice, NoticeLevel, Notifier};
pub use prompt::{PromptController, PromptDeps, SubmissionReport, optimistic_entries};
pub use reconcile::{displacement, reconcile, reconcile_at};
pub use result::{ResultCode, message_from_code};
pub use store::{MessageSnapshot, MessageStore};
pub use submission::{BoxFuture, Completion, NewConversation, SubmissionService, SubmitOutcome};
