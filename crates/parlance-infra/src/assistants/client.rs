//! AssistantsClient -- concrete `AssistantBackend` over HTTP.
//!
//! Issues authenticated JSON requests against the Assistants v2
//! thread/run/message endpoints. The API key is wrapped in
//! [`secrecy::SecretString`] and is never logged or included in `Debug`
//! output.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;

use parlance_core::relay::AssistantBackend;
use parlance_types::config::RelayConfig;
use parlance_types::error::BackendError;
use parlance_types::relay::{RemoteMessage, Run, RunSnapshot, RunStatus, Thread, Turn};

use super::types::{
    CreateMessageRequest, CreateRunRequest, CreateThreadRequest, MessageListResponse,
    MessageObject, RunObject, ThreadObject,
};

/// HTTP client for the Assistants v2 backend.
///
/// Explicitly constructed and stateless between calls: holds only the
/// connection pool, the credential, and the base URL. Each relay
/// invocation creates its own remote resources through it.
pub struct AssistantsClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

// AssistantsClient intentionally does NOT derive Debug, so the API key
// can never leak through debug formatting.

impl AssistantsClient {
    /// Protocol-version marker sent on every call.
    const BETA_HEADER: &'static str = "OpenAI-Beta";
    const BETA_VERSION: &'static str = "assistants=v2";

    /// Create a client with default configuration.
    pub fn new(api_key: SecretString) -> Self {
        Self::from_config(api_key, &RelayConfig::default())
    }

    /// Create a client from a relay configuration (base URL and
    /// per-request timeout).
    pub fn from_config(api_key: SecretString, config: &RelayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: config.base_url.clone(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(self.api_key.expose_secret())
            .header(Self::BETA_HEADER, Self::BETA_VERSION)
    }

    /// Send a request and return the body of a 2xx response.
    ///
    /// Non-2xx responses become [`BackendError::Api`] with the body
    /// carried verbatim.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, BackendError> {
        let response = request.send().await.map_err(|e| BackendError::Transport {
            message: format!("HTTP request failed: {e}"),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| BackendError::Transport {
            message: format!("failed to read response body: {e}"),
        })?;

        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

/// Parse a 2xx body into a typed record; a shape mismatch (including a
/// missing required field) is a protocol error.
fn parse<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, BackendError> {
    serde_json::from_str(body).map_err(|e| BackendError::Protocol {
        message: format!("unexpected {context} response: {e}"),
    })
}

impl AssistantBackend for AssistantsClient {
    async fn create_thread(&self) -> Result<Thread, BackendError> {
        let body = self
            .send(
                self.request(Method::POST, "/v1/threads")
                    .json(&CreateThreadRequest {}),
            )
            .await?;
        let thread: ThreadObject = parse(&body, "thread create")?;
        debug!(thread_id = %thread.id, "Thread created");
        Ok(Thread { id: thread.id })
    }

    async fn append_message(&self, thread_id: &str, turn: &Turn) -> Result<(), BackendError> {
        let request = CreateMessageRequest {
            role: turn.role,
            content: turn.content.clone(),
        };
        let path = format!("/v1/threads/{thread_id}/messages");
        // Success is the 2xx status alone; the body is unused.
        self.send(self.request(Method::POST, &path).json(&request))
            .await?;
        debug!(thread_id, role = %turn.role, "Message appended");
        Ok(())
    }

    async fn start_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run, BackendError> {
        let request = CreateRunRequest {
            assistant_id: assistant_id.to_string(),
        };
        let path = format!("/v1/threads/{thread_id}/runs");
        let body = self
            .send(self.request(Method::POST, &path).json(&request))
            .await?;
        let run: RunObject = parse(&body, "run create")?;
        debug!(thread_id, run_id = %run.id, status = %run.status, "Run started");
        Ok(Run {
            id: run.id,
            status: run.status,
        })
    }

    async fn poll_run(&self, thread_id: &str, run_id: &str) -> Result<RunSnapshot, BackendError> {
        let path = format!("/v1/threads/{thread_id}/runs/{run_id}");
        let body = self.send(self.request(Method::GET, &path)).await?;
        let run: RunObject = parse(&body, "run status")?;

        // Keep the raw body as the failure diagnostic, verbatim.
        let diagnostic = (run.status == RunStatus::Failed).then_some(body);
        Ok(RunSnapshot {
            status: run.status,
            diagnostic,
        })
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<RemoteMessage>, BackendError> {
        let path = format!("/v1/threads/{thread_id}/messages");
        let body = self.send(self.request(Method::GET, &path)).await?;
        let list: MessageListResponse = parse(&body, "message list")?;
        Ok(list
            .data
            .into_iter()
            .filter_map(MessageObject::into_remote)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client() -> AssistantsClient {
        AssistantsClient::new(SecretString::from("test-key-not-real"))
    }

    #[test]
    fn test_default_base_url() {
        let client = make_client();
        assert_eq!(
            client.url("/v1/threads"),
            "https://api.openai.com/v1/threads"
        );
    }

    #[test]
    fn test_base_url_override() {
        let client = make_client().with_base_url("http://localhost:8080".to_string());
        assert_eq!(
            client.url("/v1/threads/t1/runs/r1"),
            "http://localhost:8080/v1/threads/t1/runs/r1"
        );
    }

    #[test]
    fn test_from_config_uses_configured_base_url() {
        let config = RelayConfig {
            base_url: "https://proxy.internal".to_string(),
            ..RelayConfig::default()
        };
        let client = AssistantsClient::from_config(SecretString::from("k"), &config);
        assert_eq!(client.url("/v1/threads"), "https://proxy.internal/v1/threads");
    }

    #[test]
    fn test_parse_missing_id_is_protocol_error() {
        let err = parse::<ThreadObject>(r#"{"object": "thread"}"#, "thread create").unwrap_err();
        match err {
            BackendError::Protocol { message } => {
                assert!(message.contains("thread create"));
                assert!(message.contains("id"));
            }
            other => panic!("expected Protocol, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_typed_run() {
        let run: RunObject =
            parse(r#"{"id": "run_1", "status": "queued"}"#, "run create").unwrap();
        assert_eq!(run.id, "run_1");
        assert_eq!(run.status, RunStatus::Queued);
    }
}
