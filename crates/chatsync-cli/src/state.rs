//! Application state wiring config, gateway and session manager together.
//!
//! The session manager is generic over its gateway; AppState pins it to a
//! type-erased gateway wrapping the HTTP adapter.

use std::sync::Arc;

use anyhow::Context;

use chatsync_core::gateway::box_gateway::BoxChatGateway;
use chatsync_core::gateway::route::Scope;
use chatsync_core::session::manager::SessionManager;
use chatsync_infra::config::{apply_env_overrides, load_client_config, resolve_config_dir};
use chatsync_infra::gateway::HttpChatGateway;
use chatsync_types::config::ClientConfig;

use crate::cli::ConnectionArgs;

/// Concrete session manager over a boxed gateway.
pub type ConcreteSessionManager = SessionManager<BoxChatGateway>;

/// Shared application state for every command.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<ConcreteSessionManager>,
    pub config: ClientConfig,
}

impl AppState {
    /// Resolve configuration (file, then environment, then flags) and build
    /// the session manager for the configured tenant/user.
    pub async fn init(connection: &ConnectionArgs) -> anyhow::Result<Self> {
        let config_dir = resolve_config_dir();
        let config = apply_env_overrides(load_client_config(&config_dir).await);
        let config = connection.apply(config);

        let gateway =
            HttpChatGateway::new(&config).context("Failed to create the gateway client")?;
        let scope = Scope::new(&config.tenant, &config.user);
        tracing::debug!(
            config_dir = %config_dir.display(),
            api_url = %gateway.base_url(),
            tenant = %scope.tenant,
            user = %scope.user,
            "Session manager initialized"
        );

        Ok(Self {
            manager: Arc::new(SessionManager::new(BoxChatGateway::new(gateway), scope)),
            config,
        })
    }

    /// Populate the session cache from the gateway.
    ///
    /// Each CLI invocation starts with an empty cache, so commands that
    /// address a session by id load the list first.
    pub async fn warm(&self) -> anyhow::Result<()> {
        self.manager
            .list_sessions()
            .await
            .context("Failed to load sessions from the gateway")?;
        Ok(())
    }
}
