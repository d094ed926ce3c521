//! Conversation and remote-resource types for the relay client.
//!
//! These types model the data shapes of one relay round trip: the
//! caller-owned conversation being replayed, and the server-side thread,
//! run, and message resources it produces. Thread and run identifiers are
//! opaque strings issued by the backend; they are created fresh for every
//! relay invocation and never reused across calls.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a turn in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" => Ok(Role::Assistant),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}

/// A single role-tagged message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Build a user-authored turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// An ordered sequence of turns, owned by the caller.
///
/// Ordering is significant: turns are replayed into the remote thread in
/// exactly this order before the run starts.
pub type Conversation = Vec<Turn>;

/// Opaque handle to server-side conversation state.
///
/// Single-use: scoped to one relay invocation, never shared between
/// calls, and never explicitly deleted (the backend garbage-collects it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub id: String,
}

/// One asynchronous processing pass over a thread's accumulated messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub id: String,
    /// Status as reported by the backend at creation time. Not assumed
    /// terminal; polling observes the authoritative status.
    pub status: RunStatus,
}

/// Status of a run as reported by the backend.
///
/// Only [`Completed`](RunStatus::Completed) and
/// [`Failed`](RunStatus::Failed) are terminal. Every other value --
/// including statuses this client has never heard of, captured as
/// [`Other`](RunStatus::Other) -- means "still pending" and keeps the
/// poll loop going until its deadline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    /// Any status string not otherwise recognized.
    Other(String),
}

impl RunStatus {
    /// Whether this status ends polling.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

impl From<String> for RunStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "queued" => RunStatus::Queued,
            "in_progress" => RunStatus::InProgress,
            "completed" => RunStatus::Completed,
            "failed" => RunStatus::Failed,
            _ => RunStatus::Other(s),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Queued => write!(f, "queued"),
            RunStatus::InProgress => write!(f, "in_progress"),
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::Failed => write!(f, "failed"),
            RunStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

/// One poll observation of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSnapshot {
    pub status: RunStatus,
    /// Raw response body, verbatim, when the run has failed. Carried so
    /// the failure error can surface the backend's diagnostic unmodified.
    pub diagnostic: Option<String>,
}

/// A message fetched back from a remote thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMessage {
    pub role: Role,
    /// Text of each content block, in backend order. Blocks that carry no
    /// extractable text are already filtered out.
    pub content: Vec<String>,
    /// Creation time in unix seconds, as reported by the backend.
    pub created_at: i64,
}
