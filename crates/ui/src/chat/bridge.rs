use std::sync::Arc;

use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use smartshop_core::{
    BoxFuture, ChatError, ChatResult, Navigator, Notice, Notifier, SubmissionService,
    SubmitOutcome,
};

/// Navigation requested from the submission pipeline, applied on the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Replace(String),
    Reload,
}

pub struct ChannelNavigator {
    tx: UnboundedSender<NavigationEvent>,
}

impl Navigator for ChannelNavigator {
    fn replace_path(&self, path: &str) {
        if self
            .tx
            .unbounded_send(NavigationEvent::Replace(path.to_string()))
            .is_err()
        {
            tracing::debug!(path, "navigation receiver dropped");
        }
    }

    fn reload(&self) {
        if self.tx.unbounded_send(NavigationEvent::Reload).is_err() {
            tracing::debug!("navigation receiver dropped");
        }
    }
}

pub fn navigation_channel() -> (Arc<ChannelNavigator>, UnboundedReceiver<NavigationEvent>) {
    let (tx, rx) = unbounded();
    (Arc::new(ChannelNavigator { tx }), rx)
}

pub struct ChannelNotifier {
    tx: UnboundedSender<Notice>,
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        if let Err(error) = self.tx.unbounded_send(notice) {
            tracing::debug!(text = %error.into_inner().text, "notice receiver dropped");
        }
    }
}

pub fn notice_channel() -> (Arc<ChannelNotifier>, UnboundedReceiver<Notice>) {
    let (tx, rx) = unbounded();
    (Arc::new(ChannelNotifier { tx }), rx)
}

/// Stand-in used when no provider could be configured; every submit fails
/// as a transport error so the user sees the unknown-error toast.
pub struct UnconfiguredService {
    reason: String,
}

impl UnconfiguredService {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl SubmissionService for UnconfiguredService {
    fn submit<'a>(&'a self, _text: String) -> BoxFuture<'a, ChatResult<SubmitOutcome>> {
        Box::pin(async move {
            Err(ChatError::transport(
                "service-unconfigured",
                self.reason.clone(),
            ))
        })
    }
}
