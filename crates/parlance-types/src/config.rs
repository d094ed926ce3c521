//! Relay client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_run_timeout_secs() -> u64 {
    60
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Configuration for the conversation relay client.
///
/// Every field has a serde default, so a partial (or absent) config file
/// yields a usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Base URL of the assistant backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// How often to poll a run for completion.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Deadline for a run to reach a terminal state. Expiry stops local
    /// polling only; the remote run is not cancelled.
    #[serde(default = "default_run_timeout_secs")]
    pub run_timeout_secs: u64,

    /// Per-request timeout for individual HTTP calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            poll_interval_ms: default_poll_interval_ms(),
            run_timeout_secs: default_run_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl RelayConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
