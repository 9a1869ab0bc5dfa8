use snafu::ensure;

use crate::error::{ChatResult, InsufficientSlotsSnafu, TailOutOfRangeSnafu};
use crate::message::Message;

/// Backward offset from the tail for response `index` out of `count`.
///
/// The last response sits on the tail (offset 0) and each earlier one two slots
/// further back, which lands every response on a placeholder when the tail
/// block is made of `[user, placeholder]` pairs.
pub fn displacement(index: usize, count: usize) -> usize {
    (count - (index + 1)) * 2
}

/// Overwrites placeholders counted back from the last list entry.
pub fn reconcile(messages: &[Message], responses: &[Message]) -> ChatResult<Vec<Message>> {
    if responses.is_empty() {
        return Ok(messages.to_vec());
    }

    let Some(tail) = messages.len().checked_sub(1) else {
        return InsufficientSlotsSnafu {
            stage: "reconcile-empty-list",
            responses: responses.len(),
            tail: 0usize,
        }
        .fail();
    };

    reconcile_at(messages, tail, responses)
}

/// Overwrites `responses` into `messages` counted back from `tail`.
///
/// The write is positional: the returned list has the same length and exactly
/// `responses.len()` entries replaced. Nothing is written when any target
/// would fall before index 0.
pub fn reconcile_at(
    messages: &[Message],
    tail: usize,
    responses: &[Message],
) -> ChatResult<Vec<Message>> {
    let count = responses.len();
    if count == 0 {
        return Ok(messages.to_vec());
    }

    ensure!(
        tail < messages.len(),
        TailOutOfRangeSnafu {
            stage: "reconcile-tail",
            tail,
            len: messages.len(),
        }
    );
    ensure!(
        displacement(0, count) <= tail,
        InsufficientSlotsSnafu {
            stage: "reconcile-slots",
            responses: count,
            tail,
        }
    );

    let mut next = messages.to_vec();
    for (index, response) in responses.iter().enumerate() {
        let target = tail - displacement(index, count);
        next[target] = response.clone();
    }

    Ok(next)
}
