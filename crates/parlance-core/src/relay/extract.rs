//! Reply extraction from a fetched message list.

use parlance_types::error::RelayError;
use parlance_types::relay::{RemoteMessage, Role};
use tracing::debug;

/// Select the newest assistant-authored message and concatenate its text.
///
/// The winner is the assistant message with the maximum `created_at`;
/// on ties the last one in iteration order wins (`max_by_key` returns
/// the last maximal element). Content blocks are concatenated in backend
/// order with no separator, and the result is trimmed.
pub fn latest_reply(messages: &[RemoteMessage], thread_id: &str) -> Result<String, RelayError> {
    let reply = messages
        .iter()
        .filter(|m| m.role == Role::Assistant)
        .max_by_key(|m| m.created_at)
        .ok_or_else(|| RelayError::NoReply {
            thread_id: thread_id.to_string(),
        })?;

    let text = reply.content.concat().trim().to_string();
    debug!(
        thread_id,
        created_at = reply.created_at,
        reply_len = text.len(),
        "Extracted latest assistant reply"
    );
    Ok(text)
}
