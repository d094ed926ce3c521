//! Relay configuration loader.
//!
//! Reads `config.toml` from the given data directory and deserializes it
//! into [`RelayConfig`]. Falls back to defaults when the file is missing
//! or malformed.

use std::path::Path;

use parlance_types::config::RelayConfig;

/// Load relay configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`RelayConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and
///   returns the default.
/// - Otherwise returns the parsed config (absent fields take their
///   serde defaults).
pub async fn load_relay_config(data_dir: &Path) -> RelayConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            return RelayConfig::default();
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            return RelayConfig::default();
        }
    };

    match toml::from_str::<RelayConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            RelayConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_relay_config(tmp.path()).await;
        assert_eq!(config.base_url, "https://api.openai.com");
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.run_timeout_secs, 60);
    }

    #[tokio::test]
    async fn valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
base_url = "http://localhost:8080"
run_timeout_secs = 120
"#,
        )
        .await
        .unwrap();

        let config = load_relay_config(tmp.path()).await;
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.run_timeout_secs, 120);
        // Absent fields keep their defaults.
        assert_eq!(config.poll_interval_ms, 500);
    }

    #[tokio::test]
    async fn malformed_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "run_timeout_secs = \"soon\"")
            .await
            .unwrap();

        let config = load_relay_config(tmp.path()).await;
        assert_eq!(config.run_timeout_secs, 60);
    }
}
