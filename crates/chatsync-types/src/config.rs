//! Client configuration types for chatsync.
//!
//! `ClientConfig` represents the `config.toml` that points the client at a
//! gateway and selects the tenant/user scope the session cache is built for.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shortest per-request timeout the client uses. Lower values, including 0,
/// are raised to it.
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Top-level configuration for a chatsync client.
///
/// Loaded from `~/.chatsync/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the remote chat gateway.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Path prefix inserted between the base URL and every route.
    #[serde(default)]
    pub api_route_prefix: String,

    /// Tenant the session cache is scoped to.
    #[serde(default = "default_tenant")]
    pub tenant: String,

    /// User the session cache is scoped to.
    #[serde(default = "default_user")]
    pub user: String,

    /// Per-request timeout in seconds. Completions can take a while.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_tenant() -> String {
    "T1".to_string()
}

fn default_user() -> String {
    "1".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_route_prefix: String::new(),
            tenant: default_tenant(),
            user: default_user(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Effective per-request timeout, never below [`MIN_REQUEST_TIMEOUT_SECS`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.tenant, "T1");
        assert_eq!(config.user, "1");
        assert_eq!(config.request_timeout_secs, 120);
        assert!(config.api_route_prefix.is_empty());
    }

    #[test]
    fn test_client_config_deserialize_with_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_client_config_deserialize_with_values() {
        let toml_str = r#"
api_url = "https://chat.example.com"
api_route_prefix = "/api"
tenant = "Contoso"
user = "Mark"
request_timeout_secs = 30
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_url, "https://chat.example.com");
        assert_eq!(config.api_route_prefix, "/api");
        assert_eq!(config.tenant, "Contoso");
        assert_eq!(config.user, "Mark");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_request_timeout_never_zero() {
        let config = ClientConfig {
            request_timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(MIN_REQUEST_TIMEOUT_SECS));

        let config = ClientConfig {
            request_timeout_secs: 30,
            ..ClientConfig::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }
}
