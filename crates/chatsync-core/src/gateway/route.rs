//! Gateway route table.
//!
//! Every call the client makes against the remote chat gateway is one of the
//! [`GatewayRoute`] variants. A route knows its transport method, its path
//! segments under the tenant/user scope, and its optional query parameter.
//! Segments are returned raw; the transport is responsible for encoding them.

use std::fmt;

use chatsync_types::chat::Rating;

/// The transport methods the gateway adapter implements.
///
/// Closed on purpose: adding a method forces every `match` on it to be
/// revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMethod {
    /// Fetch a resource.
    Read,
    /// Create a resource or invoke an action.
    Invoke,
    /// Remove a resource.
    Delete,
}

impl fmt::Display for GatewayMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayMethod::Read => write!(f, "read"),
            GatewayMethod::Invoke => write!(f, "invoke"),
            GatewayMethod::Delete => write!(f, "delete"),
        }
    }
}

/// How a rate-message request carries the rating.
///
/// `Omit` sends the request without a `rating` parameter at all; `Set`
/// always includes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingUpdate {
    Omit,
    Set(bool),
}

impl From<Rating> for RatingUpdate {
    fn from(rating: Rating) -> Self {
        match rating.as_bool() {
            Some(value) => RatingUpdate::Set(value),
            None => RatingUpdate::Omit,
        }
    }
}

/// Tenant and user a session cache is scoped to.
///
/// Supplied by the caller; the manager only borrows it into routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub tenant: String,
    pub user: String,
}

impl Scope {
    pub fn new(tenant: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            tenant: tenant.into(),
            user: user.into(),
        }
    }
}

/// One addressable gateway operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayRoute<'a> {
    ListSessions,
    CreateSession,
    ListMessages {
        session_id: &'a str,
    },
    RenameSession {
        session_id: &'a str,
        new_name: &'a str,
    },
    DeleteSession {
        session_id: &'a str,
    },
    Completion {
        session_id: &'a str,
    },
    DebugLog {
        session_id: &'a str,
        debug_log_id: &'a str,
    },
    SummarizeName {
        session_id: &'a str,
    },
    RateMessage {
        session_id: &'a str,
        message_id: &'a str,
        rating: RatingUpdate,
    },
    Tenants,
    Users,
}

impl<'a> GatewayRoute<'a> {
    /// Short operation name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            GatewayRoute::ListSessions => "list_sessions",
            GatewayRoute::CreateSession => "create_session",
            GatewayRoute::ListMessages { .. } => "list_messages",
            GatewayRoute::RenameSession { .. } => "rename_session",
            GatewayRoute::DeleteSession { .. } => "delete_session",
            GatewayRoute::Completion { .. } => "completion",
            GatewayRoute::DebugLog { .. } => "debug_log",
            GatewayRoute::SummarizeName { .. } => "summarize_name",
            GatewayRoute::RateMessage { .. } => "rate_message",
            GatewayRoute::Tenants => "list_tenants",
            GatewayRoute::Users => "list_users",
        }
    }

    pub fn method(&self) -> GatewayMethod {
        match self {
            GatewayRoute::ListSessions
            | GatewayRoute::ListMessages { .. }
            | GatewayRoute::DebugLog { .. }
            | GatewayRoute::Tenants
            | GatewayRoute::Users => GatewayMethod::Read,
            GatewayRoute::CreateSession
            | GatewayRoute::RenameSession { .. }
            | GatewayRoute::Completion { .. }
            | GatewayRoute::SummarizeName { .. }
            | GatewayRoute::RateMessage { .. } => GatewayMethod::Invoke,
            GatewayRoute::DeleteSession { .. } => GatewayMethod::Delete,
        }
    }

    /// Raw (unencoded) path segments for this route under `scope`.
    pub fn segments<'s>(&self, scope: &'s Scope) -> Vec<&'s str>
    where
        'a: 's,
    {
        let sessions = |rest: &[&'s str]| -> Vec<&'s str> {
            let mut segs = vec![
                "tenant",
                scope.tenant.as_str(),
                "user",
                scope.user.as_str(),
                "sessions",
            ];
            segs.extend_from_slice(rest);
            segs
        };

        match *self {
            GatewayRoute::ListSessions | GatewayRoute::CreateSession => sessions(&[]),
            GatewayRoute::ListMessages { session_id } => sessions(&[session_id, "messages"]),
            GatewayRoute::RenameSession { session_id, .. } => sessions(&[session_id, "rename"]),
            GatewayRoute::DeleteSession { session_id } => sessions(&[session_id]),
            GatewayRoute::Completion { session_id } => sessions(&[session_id, "completion"]),
            GatewayRoute::DebugLog {
                session_id,
                debug_log_id,
            } => sessions(&[session_id, "completiondetails", debug_log_id]),
            GatewayRoute::SummarizeName { session_id } => {
                sessions(&[session_id, "summarize-name"])
            }
            GatewayRoute::RateMessage {
                session_id,
                message_id,
                ..
            } => sessions(&[session_id, "message", message_id, "rate"]),
            GatewayRoute::Tenants => vec!["meta", "tenants"],
            GatewayRoute::Users => vec!["meta", "users"],
        }
    }

    /// The query parameter this route carries, if any.
    pub fn query(&self) -> Option<(&'static str, String)> {
        match *self {
            GatewayRoute::RenameSession { new_name, .. } => {
                Some(("newChatSessionName", new_name.to_string()))
            }
            GatewayRoute::RateMessage {
                rating: RatingUpdate::Set(value),
                ..
            } => Some(("rating", value.to_string())),
            _ => None,
        }
    }

    /// Human-readable target (`/tenant/T1/.../rate?rating=true`), unencoded.
    pub fn target(&self, scope: &Scope) -> String {
        let mut target = String::new();
        for segment in self.segments(scope) {
            target.push('/');
            target.push_str(segment);
        }
        if let Some((key, value)) = self.query() {
            target.push('?');
            target.push_str(key);
            target.push('=');
            target.push_str(&value);
        }
        target
    }
}
