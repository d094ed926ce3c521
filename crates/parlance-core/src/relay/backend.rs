//! AssistantBackend trait definition.
//!
//! The port through which the relay talks to the remote assistant
//! backend; one method per remote operation. Implementations live in
//! parlance-infra (e.g., `AssistantsClient`). Uses native async fn in
//! traits (RPITIT, Rust 2024 edition).

use parlance_types::error::BackendError;
use parlance_types::relay::{RemoteMessage, Run, RunSnapshot, Thread, Turn};

/// Backend trait for the remote thread/run/message lifecycle.
///
/// All operations are single-shot: nothing is retried here, and no state
/// is held between calls -- a relay invocation owns its thread and run
/// exclusively for its lifetime.
pub trait AssistantBackend: Send + Sync {
    /// Create a fresh remote thread.
    fn create_thread(
        &self,
    ) -> impl std::future::Future<Output = Result<Thread, BackendError>> + Send;

    /// Append one turn to a thread.
    ///
    /// Must be called once per turn, strictly in conversation order,
    /// before the run is started: the backend's model state depends on
    /// message order.
    fn append_message(
        &self,
        thread_id: &str,
        turn: &Turn,
    ) -> impl std::future::Future<Output = Result<(), BackendError>> + Send;

    /// Start asynchronous processing of all messages appended so far,
    /// naming the assistant configuration to use.
    ///
    /// The returned status is whatever the backend reported; it is not
    /// assumed terminal.
    fn start_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> impl std::future::Future<Output = Result<Run, BackendError>> + Send;

    /// Observe the current status of a run.
    fn poll_run(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> impl std::future::Future<Output = Result<RunSnapshot, BackendError>> + Send;

    /// Fetch all messages on a thread.
    fn list_messages(
        &self,
        thread_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<RemoteMessage>, BackendError>> + Send;
}
