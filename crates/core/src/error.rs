use snafu::Snafu;

use crate::message::MessageId;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ChatError {
    #[snafu(display(
        "cannot place {responses} responses below tail index {tail}: the earliest target would be negative"
    ))]
    InsufficientSlots {
        stage: &'static str,
        responses: usize,
        tail: usize,
    },
    #[snafu(display("reconcile tail index {tail} is outside a list of length {len}"))]
    TailOutOfRange {
        stage: &'static str,
        tail: usize,
        len: usize,
    },
    #[snafu(display("anchor message '{anchor}' is no longer in the message list"))]
    AnchorMissing {
        stage: &'static str,
        anchor: MessageId,
    },
    #[snafu(display(
        "message list changed underneath a replace (expected version {expected}, found {current})"
    ))]
    StaleSnapshot {
        stage: &'static str,
        expected: u64,
        current: u64,
    },
    #[snafu(display("submission transport failed on `{stage}`: {source}"))]
    Transport {
        stage: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type ChatResult<T> = Result<T, ChatError>;

impl ChatError {
    /// Wraps any transport failure raised behind the submission boundary.
    pub fn transport(
        stage: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Transport {
            stage,
            source: source.into(),
        }
    }
}
