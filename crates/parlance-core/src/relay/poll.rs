//! Run polling with deadline and cancellation.
//!
//! The poll loop is a cooperative ticker, not a sleep-spin: each
//! iteration races the ticker against the caller's cancellation token,
//! so both timeout and cancellation compose with the runtime instead of
//! relying on interruption flags.

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use parlance_types::config::RelayConfig;
use parlance_types::error::{RelayError, RelayPhase};
use parlance_types::relay::RunStatus;

use crate::relay::backend::AssistantBackend;

/// Poll a run until it reaches a terminal state, the deadline expires,
/// or the wait is cancelled.
///
/// Only `completed` and `failed` are terminal; any other status --
/// including ones this client does not recognize -- keeps the loop
/// going. The first poll happens immediately; the deadline is checked
/// before every poll, so the elapsed time at expiry is at most one poll
/// interval past the configured timeout. Deadline expiry stops local
/// polling only -- the remote run is not cancelled.
pub async fn await_completion<B: AssistantBackend>(
    backend: &B,
    thread_id: &str,
    run_id: &str,
    config: &RelayConfig,
    cancel: &CancellationToken,
) -> Result<(), RelayError> {
    info!(
        thread_id,
        run_id,
        timeout_secs = config.run_timeout_secs,
        "Polling run completion"
    );

    if cancel.is_cancelled() {
        return Err(cancelled(thread_id, run_id));
    }

    let started = Instant::now();
    let mut ticker = tokio::time::interval(config.poll_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                warn!(thread_id, run_id, "Polling cancelled");
                return Err(cancelled(thread_id, run_id));
            }
            _ = ticker.tick() => {}
        }

        let elapsed = started.elapsed();
        if elapsed >= config.run_timeout() {
            let elapsed_secs = elapsed.as_secs();
            error!(thread_id, run_id, elapsed_secs, "Timed out waiting for run");
            return Err(RelayError::Timeout {
                elapsed_secs,
                thread_id: thread_id.to_string(),
                run_id: run_id.to_string(),
            });
        }

        let snapshot = backend
            .poll_run(thread_id, run_id)
            .await
            .map_err(|e| RelayError::backend(RelayPhase::PollRun, e))?;
        debug!(run_id, status = %snapshot.status, "Run status");

        match snapshot.status {
            RunStatus::Completed => {
                info!(
                    run_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Run completed"
                );
                return Ok(());
            }
            RunStatus::Failed => {
                let body = snapshot.diagnostic.unwrap_or_default();
                error!(run_id, body = %body, "Assistant run failed");
                return Err(RelayError::RunFailed {
                    run_id: run_id.to_string(),
                    body,
                });
            }
            _ => {}
        }
    }
}

fn cancelled(thread_id: &str, run_id: &str) -> RelayError {
    RelayError::Cancelled {
        thread_id: thread_id.to_string(),
        run_id: run_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::Arc;
    use std::sync::Mutex;
    use std::time::Duration;

    use parlance_types::error::BackendError;
    use parlance_types::relay::{RemoteMessage, Run, RunSnapshot, Thread, Turn};

    /// Backend whose poll_run pops from a scripted status queue; an empty
    /// queue keeps reporting in_progress.
    struct ScriptedBackend {
        statuses: Mutex<VecDeque<RunStatus>>,
        polls: Mutex<u32>,
    }

    impl ScriptedBackend {
        fn new(statuses: Vec<RunStatus>) -> Self {
            Self {
                statuses: Mutex::new(statuses.into()),
                polls: Mutex::new(0),
            }
        }

        fn polls(&self) -> u32 {
            *self.polls.lock().unwrap()
        }
    }

    impl AssistantBackend for ScriptedBackend {
        fn create_thread(
            &self,
        ) -> impl Future<Output = Result<Thread, BackendError>> + Send {
            async {
                Ok(Thread {
                    id: "thread_1".to_string(),
                })
            }
        }

        fn append_message(
            &self,
            _thread_id: &str,
            _turn: &Turn,
        ) -> impl Future<Output = Result<(), BackendError>> + Send {
            async { Ok(()) }
        }

        fn start_run(
            &self,
            _thread_id: &str,
            _assistant_id: &str,
        ) -> impl Future<Output = Result<Run, BackendError>> + Send {
            async {
                Ok(Run {
                    id: "run_1".to_string(),
                    status: RunStatus::Queued,
                })
            }
        }

        fn poll_run(
            &self,
            _thread_id: &str,
            _run_id: &str,
        ) -> impl Future<Output = Result<RunSnapshot, BackendError>> + Send {
            async {
                *self.polls.lock().unwrap() += 1;
                let status = self
                    .statuses
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or(RunStatus::InProgress);
                let diagnostic = (status == RunStatus::Failed)
                    .then(|| r#"{"status":"failed","last_error":"boom"}"#.to_string());
                Ok(RunSnapshot { status, diagnostic })
            }
        }

        fn list_messages(
            &self,
            _thread_id: &str,
        ) -> impl Future<Output = Result<Vec<RemoteMessage>, BackendError>> + Send {
            async { Ok(Vec::new()) }
        }
    }

    fn config() -> RelayConfig {
        RelayConfig::default()
    }

    #[tokio::test(start_paused = true)]
    async fn completes_after_transitions() {
        let backend = ScriptedBackend::new(vec![
            RunStatus::Queued,
            RunStatus::InProgress,
            RunStatus::Completed,
        ]);
        let cancel = CancellationToken::new();

        await_completion(&backend, "thread_1", "run_1", &config(), &cancel)
            .await
            .unwrap();
        // No polling after `completed` is observed.
        assert_eq!(backend.polls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_status_is_treated_as_pending() {
        let backend = ScriptedBackend::new(vec![
            RunStatus::Other("requires_action".to_string()),
            RunStatus::Completed,
        ]);
        let cancel = CancellationToken::new();

        await_completion(&backend, "thread_1", "run_1", &config(), &cancel)
            .await
            .unwrap();
        assert_eq!(backend.polls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_status_surfaces_diagnostic_body() {
        let backend = ScriptedBackend::new(vec![RunStatus::Failed]);
        let cancel = CancellationToken::new();

        let err = await_completion(&backend, "thread_1", "run_1", &config(), &cancel)
            .await
            .unwrap_err();
        match err {
            RelayError::RunFailed { run_id, body } => {
                assert_eq!(run_id, "run_1");
                assert!(body.contains("boom"));
            }
            other => panic!("expected RunFailed, got {other:?}"),
        }
        assert_eq!(backend.polls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_when_never_terminal() {
        let backend = ScriptedBackend::new(Vec::new());
        let cancel = CancellationToken::new();

        let err = await_completion(&backend, "thread_1", "run_1", &config(), &cancel)
            .await
            .unwrap_err();
        match err {
            RelayError::Timeout {
                elapsed_secs,
                thread_id,
                run_id,
            } => {
                // Elapsed is at least the timeout and less than one poll
                // interval past it.
                assert!(elapsed_secs >= 60);
                assert!(elapsed_secs < 61);
                assert_eq!(thread_id, "thread_1");
                assert_eq!(run_id, "run_1");
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn pre_cancelled_token_short_circuits() {
        let backend = ScriptedBackend::new(Vec::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = await_completion(&backend, "thread_1", "run_1", &config(), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Cancelled { .. }));
        assert_eq!(backend.polls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_mid_poll_propagates() {
        let backend = Arc::new(ScriptedBackend::new(Vec::new()));
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1200)).await;
            canceller.cancel();
        });

        let err = await_completion(backend.as_ref(), "thread_1", "run_1", &config(), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Cancelled { .. }));
        // Ticks at 0ms, 500ms, and 1000ms were polled before the
        // cancellation at 1200ms landed.
        assert_eq!(backend.polls(), 3);
    }
}
