use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use snafu::OptionExt;
use tokio::runtime::Handle;

use crate::ai_state::AiStateHandle;
use crate::debounce::Debouncer;
use crate::error::{AnchorMissingSnafu, ChatResult};
use crate::input::split_items;
use crate::message::{Message, MessageId};
use crate::navigation::{NavigationSettler, Navigator};
use crate::notice::{Notice, Notifier};
use crate::reconcile::reconcile_at;
use crate::result::{ResultCode, message_from_code};
use crate::store::MessageStore;
use crate::submission::{BoxFuture, SubmissionService, SubmitOutcome};

/// Builds one `[user echo, placeholder]` pair per item, in item order.
pub fn optimistic_entries(items: &[String]) -> Vec<Message> {
    items
        .iter()
        .flat_map(|item| {
            [
                Message::user(MessageId::generate(), item.clone()),
                Message::spinner(MessageId::generate()),
            ]
        })
        .collect()
}

/// Collaborators the prompt pipeline reads and writes.
pub struct PromptDeps {
    pub store: MessageStore,
    pub service: Arc<dyn SubmissionService>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
    pub ai_state: AiStateHandle,
}

/// What one submission did to the message list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmissionReport {
    /// Items parsed from the submitted text.
    pub items: usize,
    /// Placeholders overwritten with responses.
    pub reconciled: usize,
    /// The service answered with an error code.
    pub rejected: bool,
    pub navigated: bool,
}

struct PromptPipeline {
    store: MessageStore,
    service: Arc<dyn SubmissionService>,
    notifier: Arc<dyn Notifier>,
    settler: NavigationSettler,
    closed: AtomicBool,
}

impl PromptPipeline {
    async fn run(&self, value: String) -> ChatResult<SubmissionReport> {
        let items = split_items(&value);
        let mut report = SubmissionReport {
            items: items.len(),
            ..SubmissionReport::default()
        };
        if items.is_empty() {
            return Ok(report);
        }

        let entries = optimistic_entries(&items);
        let placeholder_ids = entries
            .iter()
            .filter(|message| message.is_pending())
            .map(|message| message.id.clone())
            .collect::<Vec<_>>();
        let Some(anchor) = placeholder_ids.last().cloned() else {
            return Ok(report);
        };

        self.store.append(&entries);
        tracing::debug!(items = items.len(), anchor = %anchor, "appended optimistic entries");

        let outcome = self.service.submit(value).await?;

        let (responses, completion) = match outcome {
            SubmitOutcome::Failure { code } => {
                tracing::warn!(code = %code, "submission rejected");
                if !self.closed.load(Ordering::Acquire) {
                    self.notifier.notify(Notice::error(message_from_code(&code)));
                }
                self.rollback_placeholders(&placeholder_ids);
                report.rejected = true;
                return Ok(report);
            }
            SubmitOutcome::Success {
                responses,
                completion,
            } => (responses, completion),
        };

        if !responses.is_empty() {
            self.store.try_update(|current| {
                // Count back from this submission's last placeholder in the newest
                // snapshot, not from a length captured before other appends.
                let tail = current
                    .iter()
                    .position(|message| message.id == anchor)
                    .context(AnchorMissingSnafu {
                        stage: "reconcile-find-anchor",
                        anchor: anchor.clone(),
                    })?;
                reconcile_at(current, tail, &responses)
            })?;
            report.reconciled = responses.len();
        }

        let signal = completion.await;
        if self.closed.load(Ordering::Acquire) {
            tracing::debug!("prompt controller closed before completion, skipping navigation");
            return Ok(report);
        }
        report.navigated = self.settler.settle(signal);

        Ok(report)
    }

    fn rollback_placeholders(&self, placeholder_ids: &[MessageId]) {
        self.store.update(|current| {
            current
                .iter()
                .filter(|message| !(message.is_pending() && placeholder_ids.contains(&message.id)))
                .cloned()
                .collect()
        });
    }
}

/// Input-side coordinator: debounced submit, optimistic render, reconcile, navigate.
pub struct PromptController {
    pipeline: Arc<PromptPipeline>,
    debouncer: Debouncer<String>,
}

impl PromptController {
    pub fn new(runtime: Handle, window: Duration, deps: PromptDeps) -> Self {
        let pipeline = Arc::new(PromptPipeline {
            store: deps.store,
            service: deps.service,
            notifier: deps.notifier,
            settler: NavigationSettler::new(deps.navigator, deps.ai_state),
            closed: AtomicBool::new(false),
        });

        let debouncer = {
            let pipeline = Arc::clone(&pipeline);
            Debouncer::new(runtime, window, move |value: String| {
                let pipeline = Arc::clone(&pipeline);
                Box::pin(async move {
                    match pipeline.run(value).await {
                        Ok(report) => tracing::debug!(?report, "submission settled"),
                        Err(error) => {
                            tracing::error!(error = %error, "submission failed");
                            if !pipeline.closed.load(Ordering::Acquire) {
                                pipeline
                                    .notifier
                                    .notify(Notice::error(ResultCode::UnknownError.message()));
                            }
                        }
                    }
                }) as BoxFuture<'static, ()>
            })
        };

        Self {
            pipeline,
            debouncer,
        }
    }

    /// Handles a form submit. Returns `false` when the trimmed input is empty.
    pub fn on_submit(&self, raw: &str) -> bool {
        let value = raw.trim();
        if value.is_empty() {
            return false;
        }

        self.debouncer.call(value.to_string());
        true
    }

    /// Runs one submission immediately, bypassing the debounce window.
    pub async fn submit_now(&self, raw: &str) -> ChatResult<SubmissionReport> {
        self.pipeline.run(raw.trim().to_string()).await
    }

    pub fn store(&self) -> &MessageStore {
        &self.pipeline.store
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Teardown: drops the pending submission and silences one still in flight.
    pub fn shutdown(&self) {
        self.pipeline.closed.store(true, Ordering::Release);
        if self.debouncer.cancel() {
            tracing::debug!("cancelled pending submission on teardown");
        }
    }
}

impl Drop for PromptController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimistic_entries_pair_each_item_with_a_placeholder() {
        let items = vec!["milk".to_string(), "eggs".to_string()];
        let entries = optimistic_entries(&items);

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].text(), "milk");
        assert!(entries[1].is_pending());
        assert_eq!(entries[2].text(), "eggs");
        assert!(entries[3].is_pending());
        assert_eq!(entries.iter().filter(|entry| entry.is_pending()).count(), 2);
    }

    #[test]
    fn optimistic_entries_use_distinct_ids() {
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let entries = optimistic_entries(&items);
        let mut ids = entries.iter().map(|entry| entry.id.clone()).collect::<Vec<_>>();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), entries.len());
    }
}
