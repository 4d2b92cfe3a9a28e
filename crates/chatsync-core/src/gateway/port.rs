//! ChatGateway trait definition.
//!
//! This is the port the session manager drives. Implementations live in
//! chatsync-infra (e.g., `HttpChatGateway`); tests use in-memory fakes.

use chatsync_types::chat::{DebugLog, Message, Session};
use chatsync_types::directory::DirectoryUser;
use chatsync_types::error::GatewayError;

use super::route::{RatingUpdate, Scope};

/// Typed access to the remote chat gateway.
///
/// Implementations hold no cache or session state of their own: every call
/// goes to the gateway. Uses native async fn in traits (RPITIT, Rust 2024
/// edition).
pub trait ChatGateway: Send + Sync {
    /// Fetch every session owned by the scoped user, in gateway order.
    fn list_sessions(
        &self,
        scope: &Scope,
    ) -> impl std::future::Future<Output = Result<Vec<Session>, GatewayError>> + Send;

    /// Create a session. The gateway assigns the identifier and default name.
    fn create_session(
        &self,
        scope: &Scope,
    ) -> impl std::future::Future<Output = Result<Session, GatewayError>> + Send;

    /// Fetch the messages of a session, oldest first.
    fn list_messages(
        &self,
        scope: &Scope,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, GatewayError>> + Send;

    /// Rename a session on the gateway.
    fn rename_session(
        &self,
        scope: &Scope,
        session_id: &str,
        new_name: &str,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;

    /// Delete a session and its messages on the gateway.
    fn delete_session(
        &self,
        scope: &Scope,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;

    /// Submit a user prompt and receive the messages generated for it.
    fn complete(
        &self,
        scope: &Scope,
        session_id: &str,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, GatewayError>> + Send;

    /// Ask the gateway to suggest a session name from a prompt.
    fn summarize_name(
        &self,
        scope: &Scope,
        session_id: &str,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, GatewayError>> + Send;

    /// Rate (or fetch the rating of) a message; returns the gateway's copy.
    fn rate_message(
        &self,
        scope: &Scope,
        session_id: &str,
        message_id: &str,
        rating: RatingUpdate,
    ) -> impl std::future::Future<Output = Result<Message, GatewayError>> + Send;

    /// Fetch the completion details recorded for a reply.
    fn get_debug_log(
        &self,
        scope: &Scope,
        session_id: &str,
        debug_log_id: &str,
    ) -> impl std::future::Future<Output = Result<DebugLog, GatewayError>> + Send;

    /// Fetch the tenant identifiers known to the gateway.
    fn list_tenants(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, GatewayError>> + Send;

    /// Fetch the users known to the gateway.
    fn list_users(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<DirectoryUser>, GatewayError>> + Send;
}
