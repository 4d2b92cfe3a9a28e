//! Session cache and synchronization manager.
//!
//! `SessionManager` owns the client's session cache for one tenant/user scope
//! and mediates every mutation against the [`ChatGateway`]. Gateway results
//! are applied to the cache only after the call has returned successfully, so
//! a failed or cancelled call leaves the cache as it was.
//!
//! # Exclusivity
//!
//! The cache sits behind a `RwLock` whose guards are never held across a
//! gateway call. Operations that change the shape of the session list
//! (`create_session`, `delete_session`, `list_sessions`) additionally hold
//! the list gate for their whole duration, so they never interleave with one
//! another. Renames, message loads and passthrough calls do not take the gate.

use chatsync_types::chat::{DebugLog, Message, Rating, Session};
use chatsync_types::directory::DirectoryUser;
use chatsync_types::error::{ChatError, GatewayError};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::cache::SessionCache;
use crate::gateway::port::ChatGateway;
use crate::gateway::route::{RatingUpdate, Scope};

/// Owns the session cache for one scope and keeps it in sync with the gateway.
///
/// Generic over `ChatGateway` so chatsync-core never depends on the HTTP
/// adapter. Share across tasks with `Arc<SessionManager<G>>`.
pub struct SessionManager<G: ChatGateway> {
    gateway: G,
    scope: Scope,
    cache: RwLock<SessionCache>,
    list_gate: Mutex<()>,
}

impl<G: ChatGateway> SessionManager<G> {
    /// Create a manager with an empty cache for `scope`.
    pub fn new(gateway: G, scope: Scope) -> Self {
        Self {
            gateway,
            scope,
            cache: RwLock::new(SessionCache::new()),
            list_gate: Mutex::new(()),
        }
    }

    /// Access the gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The tenant/user scope this cache belongs to.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    // --- Read-only views ---

    /// Snapshot of the cached session list, in display order.
    pub async fn sessions(&self) -> Vec<Session> {
        self.cache.read().await.sessions().to_vec()
    }

    /// Snapshot of one cached session.
    pub async fn session(&self, session_id: &str) -> Option<Session> {
        self.cache.read().await.get(session_id).cloned()
    }

    /// Cached messages of a session, or `None` if they were never loaded.
    pub async fn cached_messages(&self, session_id: &str) -> Option<Vec<Message>> {
        self.cache
            .read()
            .await
            .messages(session_id)
            .map(|messages| messages.to_vec())
    }

    // --- Cache lookup & load ---

    /// Re-fetch the full session list and replace the cache with it.
    ///
    /// This is a resynchronization, not a merge: sessions that only existed
    /// locally are dropped, and message lists are reloaded lazily.
    pub async fn list_sessions(&self) -> Result<Vec<Session>, ChatError> {
        let _gate = self.list_gate.lock().await;

        let sessions = self
            .gateway
            .list_sessions(&self.scope)
            .await
            .map_err(|e| self.remote_failure("list_sessions", None, e))?;

        let mut cache = self.cache.write().await;
        let count = cache.replace_all(sessions);
        debug!(count, tenant = %self.scope.tenant, user = %self.scope.user, "Session list refreshed");
        Ok(cache.sessions().to_vec())
    }

    /// Load a session's messages from the gateway and cache them.
    ///
    /// Sessions the cache does not know about yield an empty list without a
    /// gateway call. A gateway 404 for a cached session is `NotFound`.
    pub async fn list_messages(&self, session_id: &str) -> Result<Vec<Message>, ChatError> {
        if !self.cache.read().await.contains(session_id) {
            debug!(session_id = %session_id, "Session not cached, skipping message fetch");
            return Ok(Vec::new());
        }

        let messages = match self.gateway.list_messages(&self.scope, session_id).await {
            Ok(messages) => messages,
            Err(err) if err.is_not_found() => {
                warn!(session_id = %session_id, "Gateway reports cached session as missing");
                return Err(ChatError::NotFound(session_id.to_string()));
            }
            Err(err) => return Err(self.remote_failure("list_messages", Some(session_id), err)),
        };

        let stored = self
            .cache
            .write()
            .await
            .store_messages(session_id, messages.clone());
        if stored {
            debug!(session_id = %session_id, count = messages.len(), "Messages cached");
        } else {
            debug!(session_id = %session_id, "Session left the cache during fetch, messages not cached");
        }

        Ok(messages)
    }

    // --- Session mutation ---

    /// Create a session on the gateway and append it to the cache.
    pub async fn create_session(&self) -> Result<Session, ChatError> {
        let _gate = self.list_gate.lock().await;

        let session = self
            .gateway
            .create_session(&self.scope)
            .await
            .map_err(|e| self.remote_failure("create_session", None, e))?;

        if session.session_id.trim().is_empty() {
            let err = GatewayError::Decode("created session has no identifier".to_string());
            return Err(self.remote_failure("create_session", None, err));
        }

        let appended = self.cache.write().await.insert(session.clone());
        info!(session_id = %session.session_id, appended, "Session created");
        Ok(session)
    }

    /// Rename a cached session.
    ///
    /// The cached name changes immediately. Unless `local_only` is set, one
    /// rename call is then sent to the gateway. A failed remote rename is
    /// returned as an error but the local name is kept (best-effort).
    pub async fn rename_session(
        &self,
        session_id: &str,
        new_name: &str,
        local_only: bool,
    ) -> Result<(), ChatError> {
        require_id("session_id", session_id)?;

        let previous = self
            .cache
            .write()
            .await
            .rename(session_id, new_name)
            .ok_or_else(|| ChatError::NotFound(session_id.to_string()))?;
        debug!(session_id = %session_id, previous = %previous, new_name, "Session renamed locally");

        if local_only {
            return Ok(());
        }

        self.gateway
            .rename_session(&self.scope, session_id, new_name)
            .await
            .map_err(|e| self.remote_failure("rename_session", Some(session_id), e))?;

        info!(session_id = %session_id, new_name, "Session renamed");
        Ok(())
    }

    /// Delete a session on the gateway, then drop it from the cache.
    ///
    /// The cache entry is removed only once the gateway has confirmed the
    /// delete; on failure it stays.
    pub async fn delete_session(&self, session_id: &str) -> Result<(), ChatError> {
        require_id("session_id", session_id)?;
        let _gate = self.list_gate.lock().await;

        if !self.cache.read().await.contains(session_id) {
            return Err(ChatError::NotFound(session_id.to_string()));
        }

        self.gateway
            .delete_session(&self.scope, session_id)
            .await
            .map_err(|e| self.remote_failure("delete_session", Some(session_id), e))?;

        self.cache.write().await.remove(session_id);
        info!(session_id = %session_id, "Session deleted");
        Ok(())
    }

    // --- Completion flow ---

    /// Send a prompt and refresh the session's messages.
    ///
    /// Returns the text of the first message in the completion response, or
    /// `None` if the gateway generated nothing. The cached messages are
    /// replaced by a full reload rather than appended to.
    pub async fn send_prompt(
        &self,
        session_id: &str,
        user_text: &str,
    ) -> Result<Option<String>, ChatError> {
        require_id("session_id", session_id)?;

        let completion = self
            .gateway
            .complete(&self.scope, session_id, user_text)
            .await
            .map_err(|e| self.remote_failure("completion", Some(session_id), e))?;
        debug!(session_id = %session_id, generated = completion.len(), "Completion received");

        self.list_messages(session_id).await?;

        Ok(completion.into_iter().next().map(|message| message.text))
    }

    /// Ask the gateway for a session name. The name is not applied.
    pub async fn summarize_session_name(
        &self,
        session_id: &str,
        prompt: &str,
    ) -> Result<String, ChatError> {
        require_id("session_id", session_id)?;

        self.gateway
            .summarize_name(&self.scope, session_id, prompt)
            .await
            .map_err(|e| self.remote_failure("summarize_name", Some(session_id), e))
    }

    /// Summarize a name and show it locally.
    ///
    /// The gateway stores the summarized name itself, so only the cached copy
    /// is renamed. Returns the applied name.
    pub async fn apply_summarized_name(
        &self,
        session_id: &str,
        prompt: &str,
    ) -> Result<String, ChatError> {
        let name = self.summarize_session_name(session_id, prompt).await?;
        self.rename_session(session_id, &name, true).await?;
        Ok(name)
    }

    // --- Rating & diagnostics ---

    /// Rate a message and return the gateway's updated copy.
    ///
    /// `Rating::Unset` sends the request without a rating. The cache is not
    /// touched; reload the session's messages to see the change there.
    pub async fn rate_message(
        &self,
        message_id: &str,
        session_id: &str,
        rating: Rating,
    ) -> Result<Message, ChatError> {
        require_id("message_id", message_id)?;
        require_id("session_id", session_id)?;

        self.gateway
            .rate_message(&self.scope, session_id, message_id, RatingUpdate::from(rating))
            .await
            .map_err(|e| self.remote_failure("rate_message", Some(session_id), e))
    }

    /// Fetch completion details for a reply. Not cached.
    pub async fn get_debug_log(
        &self,
        session_id: &str,
        debug_log_id: &str,
    ) -> Result<DebugLog, ChatError> {
        require_id("session_id", session_id)?;
        require_id("debug_log_id", debug_log_id)?;

        self.gateway
            .get_debug_log(&self.scope, session_id, debug_log_id)
            .await
            .map_err(|e| self.remote_failure("debug_log", Some(session_id), e))
    }

    // --- Directory ---

    /// Tenants known to the gateway, sorted.
    pub async fn list_tenants(&self) -> Result<Vec<String>, ChatError> {
        let mut tenants = self
            .gateway
            .list_tenants()
            .await
            .map_err(|e| self.remote_failure("list_tenants", None, e))?;
        tenants.sort();
        Ok(tenants)
    }

    /// Users known to the gateway, sorted by display name.
    pub async fn list_users(&self) -> Result<Vec<DirectoryUser>, ChatError> {
        let mut users = self
            .gateway
            .list_users()
            .await
            .map_err(|e| self.remote_failure("list_users", None, e))?;
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    fn remote_failure(
        &self,
        operation: &'static str,
        session_id: Option<&str>,
        err: GatewayError,
    ) -> ChatError {
        warn!(
            operation,
            session_id = session_id.unwrap_or(""),
            error = %err,
            "Gateway call failed"
        );
        ChatError::from(err)
    }
}

fn require_id(field: &str, value: &str) -> Result<(), ChatError> {
    if value.trim().is_empty() {
        return Err(ChatError::InvalidArgument(format!("{field} must not be empty")));
    }
    Ok(())
}
