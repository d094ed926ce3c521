//! Relay service orchestrating one conversation round trip.
//!
//! RelayService drives the full sequence against any
//! [`AssistantBackend`]: create a fresh thread, replay the conversation
//! in order, start a run, poll it to completion, fetch the messages, and
//! extract the newest assistant reply. Backend failures are wrapped with
//! the phase that produced them so callers can distinguish failure
//! phases without depending on backend internals.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use parlance_types::config::RelayConfig;
use parlance_types::error::{RelayError, RelayPhase};
use parlance_types::relay::Turn;

use crate::relay::backend::AssistantBackend;
use crate::relay::{extract, poll};

/// Orchestrates the thread-create -> append -> run -> poll -> fetch
/// sequence for one conversation.
///
/// Generic over [`AssistantBackend`] to maintain clean architecture
/// (parlance-core never depends on parlance-infra). Holds no per-call
/// state: every relay invocation allocates its own thread and run, and
/// two concurrent relays are fully independent. Callers that need
/// at-most-one-relay-per-conversation semantics must serialize
/// externally.
pub struct RelayService<B: AssistantBackend> {
    backend: B,
    config: RelayConfig,
}

impl<B: AssistantBackend> RelayService<B> {
    /// Create a new relay service over the given backend.
    pub fn new(backend: B, config: RelayConfig) -> Self {
        Self { backend, config }
    }

    /// Access the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Access the relay configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Relay a conversation to the named assistant and return its reply.
    ///
    /// Blocks the calling task until completion, failure, or timeout.
    /// Nothing is retried: a single remote failure aborts the relay.
    pub async fn relay(
        &self,
        conversation: &[Turn],
        assistant_id: &str,
    ) -> Result<String, RelayError> {
        self.relay_cancellable(conversation, assistant_id, &CancellationToken::new())
            .await
    }

    /// Like [`relay`](Self::relay), with a caller-supplied cancellation
    /// token. Cancellation during the polling wait surfaces as
    /// [`RelayError::Cancelled`]; it is never silently absorbed.
    pub async fn relay_cancellable(
        &self,
        conversation: &[Turn],
        assistant_id: &str,
        cancel: &CancellationToken,
    ) -> Result<String, RelayError> {
        info!(
            turns = conversation.len(),
            assistant_id, "Relaying conversation"
        );

        let thread = self
            .backend
            .create_thread()
            .await
            .map_err(|e| RelayError::backend(RelayPhase::CreateThread, e))?;
        debug!(thread_id = %thread.id, "Thread created");

        for turn in conversation {
            debug!(thread_id = %thread.id, role = %turn.role, "Replaying turn");
            self.backend
                .append_message(&thread.id, turn)
                .await
                .map_err(|e| RelayError::backend(RelayPhase::AppendMessage, e))?;
        }

        let run = self
            .backend
            .start_run(&thread.id, assistant_id)
            .await
            .map_err(|e| RelayError::backend(RelayPhase::StartRun, e))?;
        debug!(thread_id = %thread.id, run_id = %run.id, status = %run.status, "Run started");

        poll::await_completion(&self.backend, &thread.id, &run.id, &self.config, cancel).await?;

        let messages = self
            .backend
            .list_messages(&thread.id)
            .await
            .map_err(|e| RelayError::backend(RelayPhase::FetchMessages, e))?;

        let reply = extract::latest_reply(&messages, &thread.id)?;
        info!(thread_id = %thread.id, reply_len = reply.len(), "Relay finished");
        Ok(reply)
    }

    /// Relay a one-turn user conversation, e.g. to produce a short label
    /// for a brand-new conversation.
    pub async fn summarize(
        &self,
        message: &str,
        assistant_id: &str,
    ) -> Result<String, RelayError> {
        debug!(message_len = message.len(), "Summarizing single message");
        let conversation = vec![Turn::user(message)];
        self.relay(&conversation, assistant_id).await
    }
}
