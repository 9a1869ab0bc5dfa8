use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::watch;

use crate::error::{ChatError, ChatResult, StaleSnapshotSnafu};
use crate::message::Message;

/// One published state of the message list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageSnapshot {
    pub version: u64,
    pub messages: Vec<Message>,
}

struct StoreInner {
    current: ArcSwap<MessageSnapshot>,
    version_tx: watch::Sender<u64>,
}

/// Shared message list mutated only by whole-list replacement.
///
/// Every write is a pointer compare-and-swap against the snapshot the writer
/// read, so a writer that computed its next list from an outdated snapshot is
/// rejected instead of silently dropping another writer's entries.
#[derive(Clone)]
pub struct MessageStore {
    inner: Arc<StoreInner>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::with_messages(Vec::new())
    }

    pub fn with_messages(messages: Vec<Message>) -> Self {
        let (version_tx, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                current: ArcSwap::from_pointee(MessageSnapshot {
                    version: 0,
                    messages,
                }),
                version_tx,
            }),
        }
    }

    pub fn snapshot(&self) -> Arc<MessageSnapshot> {
        self.inner.current.load_full()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.snapshot().messages.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.current.load().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receiver that observes the version of every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.version_tx.subscribe()
    }

    /// Publishes `messages` only if `expected` is still the current snapshot.
    pub fn replace_if_current(
        &self,
        expected: &Arc<MessageSnapshot>,
        messages: Vec<Message>,
    ) -> ChatResult<Arc<MessageSnapshot>> {
        let next = Arc::new(MessageSnapshot {
            version: expected.version + 1,
            messages,
        });

        let previous = self.inner.current.compare_and_swap(expected, Arc::clone(&next));
        if !Arc::ptr_eq(&*previous, expected) {
            return StaleSnapshotSnafu {
                stage: "replace-if-current",
                expected: expected.version,
                current: previous.version,
            }
            .fail();
        }

        self.inner.version_tx.send_replace(next.version);
        Ok(next)
    }

    /// Functional update retried against the newest snapshot until it lands.
    pub fn update<F>(&self, mut compute: F) -> Arc<MessageSnapshot>
    where
        F: FnMut(&[Message]) -> Vec<Message>,
    {
        loop {
            let current = self.snapshot();
            let next = compute(&current.messages);
            match self.replace_if_current(&current, next) {
                Ok(published) => return published,
                Err(_) => {
                    tracing::trace!(version = current.version, "message list moved, retrying update");
                }
            }
        }
    }

    /// Fallible functional update; a `compute` error aborts without writing.
    pub fn try_update<F>(&self, mut compute: F) -> ChatResult<Arc<MessageSnapshot>>
    where
        F: FnMut(&[Message]) -> ChatResult<Vec<Message>>,
    {
        loop {
            let current = self.snapshot();
            let next = compute(&current.messages)?;
            match self.replace_if_current(&current, next) {
                Ok(published) => return Ok(published),
                Err(ChatError::StaleSnapshot { .. }) => continue,
                Err(error) => return Err(error),
            }
        }
    }

    /// Appends entries in one atomic replace.
    pub fn append(&self, entries: &[Message]) -> Arc<MessageSnapshot> {
        self.update(|current| {
            let mut next = Vec::with_capacity(current.len() + entries.len());
            next.extend_from_slice(current);
            next.extend_from_slice(entries);
            next
        })
    }

    /// Replaces the whole list regardless of its current content.
    pub fn reset(&self, messages: Vec<Message>) -> Arc<MessageSnapshot> {
        self.update(|_| messages.clone())
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageId;

    fn user(id: &str) -> Message {
        Message::user(MessageId::new(id), id)
    }

    #[test]
    fn stale_snapshot_is_rejected() {
        let store = MessageStore::new();
        let stale = store.snapshot();

        store.append(&[user("a")]);

        let error = store
            .replace_if_current(&stale, vec![user("b")])
            .expect_err("stale write must fail");
        assert!(matches!(
            error,
            ChatError::StaleSnapshot {
                expected: 0,
                current: 1,
                ..
            }
        ));
        assert_eq!(store.messages(), vec![user("a")]);
    }

    #[test]
    fn update_recomputes_from_newest_snapshot() {
        let store = MessageStore::new();
        let mut interleaved = false;

        let published = store.update(|current| {
            if !interleaved {
                interleaved = true;
                // Another writer lands while this computation is in flight.
                store.append(&[user("other")]);
            }
            let mut next = current.to_vec();
            next.push(user("mine"));
            next
        });

        assert_eq!(published.messages, vec![user("other"), user("mine")]);
        assert_eq!(published.version, 2);
    }

    #[test]
    fn try_update_error_leaves_list_untouched() {
        let store = MessageStore::with_messages(vec![user("a")]);
        let result = store.try_update(|_| {
            crate::error::TailOutOfRangeSnafu {
                stage: "test",
                tail: 5usize,
                len: 1usize,
            }
            .fail()
        });

        assert!(matches!(result, Err(ChatError::TailOutOfRange { .. })));
        assert_eq!(store.snapshot().version, 0);
    }

    #[test]
    fn subscribers_observe_versions() {
        let store = MessageStore::new();
        let mut receiver = store.subscribe();

        store.append(&[user("a")]);
        assert!(receiver.has_changed().expect("sender alive"));
        assert_eq!(*receiver.borrow_and_update(), 1);

        store.reset(Vec::new());
        assert_eq!(*receiver.borrow_and_update(), 2);
        assert!(store.is_empty());
    }
}
