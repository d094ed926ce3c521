//! Assistants v2 wire types.
//!
//! One explicit serde record per endpoint, so a response missing a
//! required field fails typed deserialization (surfaced as a protocol
//! error) instead of being probed out of a loosely typed map.

use serde::{Deserialize, Serialize};

use parlance_types::relay::{RemoteMessage, Role, RunStatus};

/// Request body for `POST /v1/threads`. Serializes to `{}`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateThreadRequest {}

/// Response body for `POST /v1/threads`.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadObject {
    pub id: String,
}

/// Request body for `POST /v1/threads/{thread_id}/messages`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest {
    pub role: Role,
    pub content: String,
}

/// Request body for `POST /v1/threads/{thread_id}/runs`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRunRequest {
    pub assistant_id: String,
}

/// Response body for run creation and run polling.
#[derive(Debug, Clone, Deserialize)]
pub struct RunObject {
    pub id: String,
    pub status: RunStatus,
}

/// Response body for `GET /v1/threads/{thread_id}/messages`.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageListResponse {
    pub data: Vec<MessageObject>,
}

/// One message in a thread's message list.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageObject {
    pub role: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub content: Vec<MessageContentBlock>,
}

impl MessageObject {
    /// Convert to the domain representation.
    ///
    /// Messages with a role this client does not model are dropped
    /// entirely (the relay only ever selects assistant messages, so
    /// nothing of value is lost). Non-text content blocks carry no
    /// extractable text and are filtered out here.
    pub fn into_remote(self) -> Option<RemoteMessage> {
        let role = self.role.parse::<Role>().ok()?;
        let content = self
            .content
            .into_iter()
            .filter_map(|block| match block {
                MessageContentBlock::Text { text } => Some(text.value),
                MessageContentBlock::Other => None,
            })
            .collect();
        Some(RemoteMessage {
            role,
            content,
            created_at: self.created_at,
        })
    }
}

/// A content block in a thread message.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum MessageContentBlock {
    #[serde(rename = "text")]
    Text { text: TextContent },
    /// Any block type without extractable text (images, files, ...).
    #[serde(other)]
    Other,
}

/// The text payload of a text content block.
#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    pub value: String,
}
