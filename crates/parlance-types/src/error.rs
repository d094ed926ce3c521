//! Error taxonomy for the relay client.
//!
//! Two layers, mirroring the component boundary: [`BackendError`] is what
//! a backend implementation can produce for a single remote operation;
//! [`RelayError`] is what callers of the relay service see, with backend
//! failures wrapped alongside the phase that produced them.

use std::fmt;

use thiserror::Error;

/// Errors from a single backend operation.
///
/// Produced by `AssistantBackend` implementations. Nothing here is
/// retried by the relay client; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Network or IO failure before a response was received.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The backend answered outside the 2xx range. The body is carried
    /// verbatim for diagnostics.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// A 2xx response arrived but did not have the expected shape
    /// (e.g. a missing identifier field). Always fatal to the call.
    #[error("protocol error: {message}")]
    Protocol { message: String },
}

/// The relay step in which a backend failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayPhase {
    CreateThread,
    AppendMessage,
    StartRun,
    PollRun,
    FetchMessages,
}

impl fmt::Display for RelayPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayPhase::CreateThread => write!(f, "creating thread"),
            RelayPhase::AppendMessage => write!(f, "appending message"),
            RelayPhase::StartRun => write!(f, "starting run"),
            RelayPhase::PollRun => write!(f, "polling run"),
            RelayPhase::FetchMessages => write!(f, "fetching messages"),
        }
    }
}

/// Errors from a full relay round trip.
///
/// Backend failures are wrapped with the phase that produced them so
/// callers can distinguish failure phases without depending on backend
/// internals. A single remote failure aborts the whole relay; nothing is
/// retried automatically.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A backend operation failed during the named phase.
    #[error("{phase} failed: {source}")]
    Backend {
        phase: RelayPhase,
        #[source]
        source: BackendError,
    },

    /// The backend reported run status `failed`. `body` is the raw
    /// diagnostic body from the poll response.
    #[error("assistant run '{run_id}' failed: {body}")]
    RunFailed { run_id: String, body: String },

    /// Polling exceeded the configured deadline without the run reaching
    /// a terminal state. The remote run may still be executing; only
    /// local polling stops.
    #[error(
        "timeout after {elapsed_secs} seconds waiting for run '{run_id}' in thread '{thread_id}'"
    )]
    Timeout {
        elapsed_secs: u64,
        thread_id: String,
        run_id: String,
    },

    /// The polling wait was cancelled by the hosting execution context.
    #[error("cancelled while waiting for run '{run_id}' in thread '{thread_id}'")]
    Cancelled { thread_id: String, run_id: String },

    /// The run completed but no assistant-authored message existed on
    /// the thread.
    #[error("no assistant response found in thread '{thread_id}'")]
    NoReply { thread_id: String },
}

impl RelayError {
    /// Wrap a backend failure with the phase that produced it.
    pub fn backend(phase: RelayPhase, source: BackendError) -> Self {
        RelayError::Backend { phase, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Api {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 429): rate limited");
    }

    #[test]
    fn test_relay_error_names_phase() {
        let err = RelayError::backend(
            RelayPhase::CreateThread,
            BackendError::Transport {
                message: "connection refused".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "creating thread failed: transport error: connection refused"
        );
    }

    #[test]
    fn test_timeout_display_names_ids() {
        let err = RelayError::Timeout {
            elapsed_secs: 61,
            thread_id: "thread_1".to_string(),
            run_id: "run_1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("61 seconds"));
        assert!(msg.contains("thread_1"));
        assert!(msg.contains("run_1"));
    }

    #[test]
    fn test_run_failed_carries_body() {
        let err = RelayError::RunFailed {
            run_id: "run_9".to_string(),
            body: r#"{"status":"failed","last_error":{"code":"server_error"}}"#.to_string(),
        };
        assert!(err.to_string().contains("server_error"));
    }
}
