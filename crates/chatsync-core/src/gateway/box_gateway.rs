//! BoxChatGateway -- object-safe dynamic dispatch wrapper for ChatGateway.
//!
//! 1. Define an object-safe `ChatGatewayDyn` trait with boxed futures
//! 2. Blanket-impl `ChatGatewayDyn` for all `T: ChatGateway`
//! 3. `BoxChatGateway` wraps `Box<dyn ChatGatewayDyn>` and delegates
//!
//! `BoxChatGateway` itself implements `ChatGateway`, so a
//! `SessionManager<BoxChatGateway>` can be built over any adapter chosen at
//! runtime.

use std::future::Future;
use std::pin::Pin;

use chatsync_types::chat::{DebugLog, Message, Session};
use chatsync_types::directory::DirectoryUser;
use chatsync_types::error::GatewayError;

use super::port::ChatGateway;
use super::route::{RatingUpdate, Scope};

type GatewayFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, GatewayError>> + Send + 'a>>;

/// Object-safe version of [`ChatGateway`] with boxed futures.
pub trait ChatGatewayDyn: Send + Sync {
    fn list_sessions_boxed<'a>(&'a self, scope: &'a Scope) -> GatewayFuture<'a, Vec<Session>>;

    fn create_session_boxed<'a>(&'a self, scope: &'a Scope) -> GatewayFuture<'a, Session>;

    fn list_messages_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
    ) -> GatewayFuture<'a, Vec<Message>>;

    fn rename_session_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
        new_name: &'a str,
    ) -> GatewayFuture<'a, ()>;

    fn delete_session_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
    ) -> GatewayFuture<'a, ()>;

    fn complete_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
        prompt: &'a str,
    ) -> GatewayFuture<'a, Vec<Message>>;

    fn summarize_name_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
        prompt: &'a str,
    ) -> GatewayFuture<'a, String>;

    fn rate_message_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
        message_id: &'a str,
        rating: RatingUpdate,
    ) -> GatewayFuture<'a, Message>;

    fn get_debug_log_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
        debug_log_id: &'a str,
    ) -> GatewayFuture<'a, DebugLog>;

    fn list_tenants_boxed(&self) -> GatewayFuture<'_, Vec<String>>;

    fn list_users_boxed(&self) -> GatewayFuture<'_, Vec<DirectoryUser>>;
}

/// Blanket implementation: any `ChatGateway` automatically implements `ChatGatewayDyn`.
impl<T: ChatGateway> ChatGatewayDyn for T {
    fn list_sessions_boxed<'a>(&'a self, scope: &'a Scope) -> GatewayFuture<'a, Vec<Session>> {
        Box::pin(self.list_sessions(scope))
    }

    fn create_session_boxed<'a>(&'a self, scope: &'a Scope) -> GatewayFuture<'a, Session> {
        Box::pin(self.create_session(scope))
    }

    fn list_messages_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
    ) -> GatewayFuture<'a, Vec<Message>> {
        Box::pin(self.list_messages(scope, session_id))
    }

    fn rename_session_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
        new_name: &'a str,
    ) -> GatewayFuture<'a, ()> {
        Box::pin(self.rename_session(scope, session_id, new_name))
    }

    fn delete_session_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
    ) -> GatewayFuture<'a, ()> {
        Box::pin(self.delete_session(scope, session_id))
    }

    fn complete_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
        prompt: &'a str,
    ) -> GatewayFuture<'a, Vec<Message>> {
        Box::pin(self.complete(scope, session_id, prompt))
    }

    fn summarize_name_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
        prompt: &'a str,
    ) -> GatewayFuture<'a, String> {
        Box::pin(self.summarize_name(scope, session_id, prompt))
    }

    fn rate_message_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
        message_id: &'a str,
        rating: RatingUpdate,
    ) -> GatewayFuture<'a, Message> {
        Box::pin(self.rate_message(scope, session_id, message_id, rating))
    }

    fn get_debug_log_boxed<'a>(
        &'a self,
        scope: &'a Scope,
        session_id: &'a str,
        debug_log_id: &'a str,
    ) -> GatewayFuture<'a, DebugLog> {
        Box::pin(self.get_debug_log(scope, session_id, debug_log_id))
    }

    fn list_tenants_boxed(&self) -> GatewayFuture<'_, Vec<String>> {
        Box::pin(self.list_tenants())
    }

    fn list_users_boxed(&self) -> GatewayFuture<'_, Vec<DirectoryUser>> {
        Box::pin(self.list_users())
    }
}

/// Type-erased chat gateway.
///
/// `ChatGateway` uses RPITIT and cannot be a trait object directly;
/// `BoxChatGateway` restores dynamic dispatch by delegating to the inner
/// `ChatGatewayDyn` trait object.
pub struct BoxChatGateway {
    inner: Box<dyn ChatGatewayDyn + Send + Sync>,
}

impl BoxChatGateway {
    /// Wrap a concrete `ChatGateway` in a type-erased box.
    pub fn new<T: ChatGateway + 'static>(gateway: T) -> Self {
        Self {
            inner: Box::new(gateway),
        }
    }
}

impl ChatGateway for BoxChatGateway {
    async fn list_sessions(&self, scope: &Scope) -> Result<Vec<Session>, GatewayError> {
        self.inner.list_sessions_boxed(scope).await
    }

    async fn create_session(&self, scope: &Scope) -> Result<Session, GatewayError> {
        self.inner.create_session_boxed(scope).await
    }

    async fn list_messages(
        &self,
        scope: &Scope,
        session_id: &str,
    ) -> Result<Vec<Message>, GatewayError> {
        self.inner.list_messages_boxed(scope, session_id).await
    }

    async fn rename_session(
        &self,
        scope: &Scope,
        session_id: &str,
        new_name: &str,
    ) -> Result<(), GatewayError> {
        self.inner
            .rename_session_boxed(scope, session_id, new_name)
            .await
    }

    async fn delete_session(&self, scope: &Scope, session_id: &str) -> Result<(), GatewayError> {
        self.inner.delete_session_boxed(scope, session_id).await
    }

    async fn complete(
        &self,
        scope: &Scope,
        session_id: &str,
        prompt: &str,
    ) -> Result<Vec<Message>, GatewayError> {
        self.inner.complete_boxed(scope, session_id, prompt).await
    }

    async fn summarize_name(
        &self,
        scope: &Scope,
        session_id: &str,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        self.inner
            .summarize_name_boxed(scope, session_id, prompt)
            .await
    }

    async fn rate_message(
        &self,
        scope: &Scope,
        session_id: &str,
        message_id: &str,
        rating: RatingUpdate,
    ) -> Result<Message, GatewayError> {
        self.inner
            .rate_message_boxed(scope, session_id, message_id, rating)
            .await
    }

    async fn get_debug_log(
        &self,
        scope: &Scope,
        session_id: &str,
        debug_log_id: &str,
    ) -> Result<DebugLog, GatewayError> {
        self.inner
            .get_debug_log_boxed(scope, session_id, debug_log_id)
            .await
    }

    async fn list_tenants(&self) -> Result<Vec<String>, GatewayError> {
        self.inner.list_tenants_boxed().await
    }

    async fn list_users(&self) -> Result<Vec<DirectoryUser>, GatewayError> {
        self.inner.list_users_boxed().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::manager::SessionManager;

    /// Gateway with one fixed session and directory entries.
    struct StaticGateway;

    fn session(id: &str, name: &str) -> Session {
        Session {
            session_id: id.to_string(),
            name: name.to_string(),
            tenant_id: "T1".to_string(),
            user_id: "U1".to_string(),
            tokens_used: None,
            messages: None,
        }
    }

    impl ChatGateway for StaticGateway {
        async fn list_sessions(&self, _scope: &Scope) -> Result<Vec<Session>, GatewayError> {
            Ok(vec![session("s1", "Chat 1")])
        }

        async fn create_session(&self, _scope: &Scope) -> Result<Session, GatewayError> {
            Ok(session("s2", "New Chat"))
        }

        async fn list_messages(
            &self,
            _scope: &Scope,
            _session_id: &str,
        ) -> Result<Vec<Message>, GatewayError> {
            Ok(Vec::new())
        }

        async fn rename_session(
            &self,
            _scope: &Scope,
            _session_id: &str,
            _new_name: &str,
        ) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn delete_session(
            &self,
            _scope: &Scope,
            session_id: &str,
        ) -> Result<(), GatewayError> {
            Err(GatewayError::Status {
                status: 500,
                body: format!("cannot delete {session_id}"),
            })
        }

        async fn complete(
            &self,
            _scope: &Scope,
            _session_id: &str,
            _prompt: &str,
        ) -> Result<Vec<Message>, GatewayError> {
            Ok(Vec::new())
        }

        async fn summarize_name(
            &self,
            _scope: &Scope,
            _session_id: &str,
            prompt: &str,
        ) -> Result<String, GatewayError> {
            Ok(format!("About {prompt}"))
        }

        async fn rate_message(
            &self,
            _scope: &Scope,
            _session_id: &str,
            _message_id: &str,
            _rating: RatingUpdate,
        ) -> Result<Message, GatewayError> {
            Err(GatewayError::Status {
                status: 404,
                body: String::new(),
            })
        }

        async fn get_debug_log(
            &self,
            _scope: &Scope,
            _session_id: &str,
            _debug_log_id: &str,
        ) -> Result<DebugLog, GatewayError> {
            Err(GatewayError::Status {
                status: 404,
                body: String::new(),
            })
        }

        async fn list_tenants(&self) -> Result<Vec<String>, GatewayError> {
            Ok(vec!["T2".to_string(), "T1".to_string()])
        }

        async fn list_users(&self) -> Result<Vec<DirectoryUser>, GatewayError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_box_gateway_delegates() {
        let gateway = BoxChatGateway::new(StaticGateway);
        let scope = Scope::new("T1", "U1");

        let sessions = gateway.list_sessions(&scope).await.unwrap();
        assert_eq!(sessions[0].session_id, "s1");

        let name = gateway.summarize_name(&scope, "s1", "loans").await.unwrap();
        assert_eq!(name, "About loans");

        let err = gateway.delete_session(&scope, "s1").await.unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_manager_over_box_gateway() {
        let manager = SessionManager::new(
            BoxChatGateway::new(StaticGateway),
            Scope::new("T1", "U1"),
        );

        manager.list_sessions().await.unwrap();
        let created = manager.create_session().await.unwrap();
        assert_eq!(created.session_id, "s2");
        assert_eq!(manager.sessions().await.len(), 2);

        assert_eq!(manager.list_tenants().await.unwrap(), vec!["T1", "T2"]);
    }
}
