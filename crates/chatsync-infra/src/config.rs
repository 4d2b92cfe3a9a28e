//! Client configuration loader for chatsync.
//!
//! Reads `config.toml` from the config directory (`~/.chatsync/` in
//! production) and deserializes it into [`ClientConfig`]. Falls back to
//! defaults when the file is missing or malformed, then applies
//! `CHATSYNC_*` environment overrides.

use std::path::{Path, PathBuf};

use chatsync_types::config::ClientConfig;

/// Environment variable naming the config directory.
pub const CONFIG_DIR_ENV: &str = "CHATSYNC_CONFIG_DIR";

/// Resolve the config directory.
///
/// Uses `CHATSYNC_CONFIG_DIR` if set, otherwise `~/.chatsync`, otherwise
/// `.chatsync` in the current directory.
pub fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatsync");
    }

    PathBuf::from(".chatsync")
}

/// Load client configuration from `{config_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_client_config(config_dir: &Path) -> ClientConfig {
    let config_path = config_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}

/// Apply `CHATSYNC_API_URL`, `CHATSYNC_TENANT` and `CHATSYNC_USER` from the
/// process environment.
pub fn apply_env_overrides(config: ClientConfig) -> ClientConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides from an arbitrary lookup. Empty values are ignored.
pub fn apply_overrides(
    mut config: ClientConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> ClientConfig {
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(api_url) = get("CHATSYNC_API_URL") {
        config.api_url = api_url;
    }
    if let Some(tenant) = get("CHATSYNC_TENANT") {
        config.tenant = tenant;
    }
    if let Some(user) = get("CHATSYNC_USER") {
        config.user = user;
    }
    config
}
