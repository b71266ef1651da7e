//! Conversation history rules.
//!
//! Stateless helpers that decide which slice of a session is shown to a
//! provider and how a completed turn extends the stored history.

use super::entities::Message;

/// Maximum number of stored messages sent to a provider (10 exchanges).
pub const CONTEXT_WINDOW_MESSAGES: usize = 20;

/// Trailing slice of `history` sent to a provider as context.
///
/// Never truncates storage; persisted history may be longer than the window.
pub fn build_window(history: &[Message]) -> &[Message] {
    let start = history.len().saturating_sub(CONTEXT_WINDOW_MESSAGES);
    &history[start..]
}

/// Build the two records of a completed turn, each stamped at construction.
pub fn new_turn(user_message: &str, reply: &str) -> [Message; 2] {
    [Message::user(user_message), Message::assistant(reply)]
}

/// Extend `history` with a completed turn. The existing messages are an
/// unchanged prefix of the result.
pub fn append_turn(history: &[Message], user_message: &str, reply: &str) -> Vec<Message> {
    let mut updated = Vec::with_capacity(history.len() + 2);
    updated.extend_from_slice(history);
    updated.extend(new_turn(user_message, reply));
    updated
}
