use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::error::ChatResult;
use crate::message::Message;
use crate::result::ResultCode;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Signal that the submission created a conversation on the service side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NewConversation;

/// Background completion resolved once the assistant finished the whole turn.
pub type Completion = BoxFuture<'static, Option<NewConversation>>;

pub enum SubmitOutcome {
    Success {
        /// Responses in the order they should be placed, earliest first.
        responses: Vec<Message>,
        completion: Completion,
    },
    Failure {
        /// Raw result code; unmapped values are tolerated.
        code: String,
    },
}

impl SubmitOutcome {
    pub fn success(responses: Vec<Message>, completion: Completion) -> Self {
        Self::Success {
            responses,
            completion,
        }
    }

    pub fn failure(code: ResultCode) -> Self {
        Self::Failure {
            code: code.as_str().to_string(),
        }
    }

    /// Success whose completion resolves immediately with `signal`.
    pub fn ready(responses: Vec<Message>, signal: Option<NewConversation>) -> Self {
        Self::success(responses, Box::pin(async move { signal }))
    }
}

impl fmt::Debug for SubmitOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { responses, .. } => formatter
                .debug_struct("Success")
                .field("responses", responses)
                .finish_non_exhaustive(),
            Self::Failure { code } => formatter
                .debug_struct("Failure")
                .field("code", code)
                .finish(),
        }
    }
}

/// The assistant action that receives the raw submitted text.
pub trait SubmissionService: Send + Sync {
    fn submit<'a>(&'a self, text: String) -> BoxFuture<'a, ChatResult<SubmitOutcome>>;
}
