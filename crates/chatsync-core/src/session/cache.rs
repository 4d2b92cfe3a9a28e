//! Ordered, identifier-unique session cache.
//!
//! Pure data structure with no locking and no I/O. The manager serializes
//! access to it and decides when gateway results are applied.

use chatsync_types::chat::{Message, Session};
use tracing::debug;

/// The client's replica of the scoped user's session list.
///
/// Order is the gateway's list order followed by sessions created since the
/// last full refresh. Identifiers are unique.
#[derive(Debug, Clone, Default)]
pub struct SessionCache {
    sessions: Vec<Session>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn get(&self, session_id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.session_id == session_id)
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.get(session_id).is_some()
    }

    fn get_mut(&mut self, session_id: &str) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.session_id == session_id)
    }

    /// Replace the whole list with a fresh gateway listing.
    ///
    /// Later duplicates of an identifier are dropped so the cache stays
    /// unique. Returns the number of sessions kept.
    pub fn replace_all(&mut self, sessions: Vec<Session>) -> usize {
        let mut unique: Vec<Session> = Vec::with_capacity(sessions.len());
        for session in sessions {
            if unique.iter().any(|s| s.session_id == session.session_id) {
                debug!(session_id = %session.session_id, "Dropping duplicate session from listing");
                continue;
            }
            unique.push(session);
        }
        self.sessions = unique;
        self.sessions.len()
    }

    /// Append a newly created session, or replace the entry already holding
    /// its identifier. Returns `true` when the session was appended.
    pub fn insert(&mut self, session: Session) -> bool {
        match self.get_mut(&session.session_id) {
            Some(existing) => {
                *existing = session;
                false
            }
            None => {
                self.sessions.push(session);
                true
            }
        }
    }

    /// Set a session's display name. Returns the previous name, or `None`
    /// when the session is not cached.
    pub fn rename(&mut self, session_id: &str, new_name: &str) -> Option<String> {
        let session = self.get_mut(session_id)?;
        Some(std::mem::replace(&mut session.name, new_name.to_string()))
    }

    pub fn remove(&mut self, session_id: &str) -> Option<Session> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.session_id == session_id)?;
        Some(self.sessions.remove(index))
    }

    /// Store a complete message listing on a session.
    ///
    /// Returns `false` (and stores nothing) when the session is not cached.
    pub fn store_messages(&mut self, session_id: &str, messages: Vec<Message>) -> bool {
        match self.get_mut(session_id) {
            Some(session) => {
                session.messages = Some(messages);
                true
            }
            None => false,
        }
    }

    /// Cached messages of a session; `None` if never fetched or not cached.
    pub fn messages(&self, session_id: &str) -> Option<&[Message]> {
        self.get(session_id)?.messages.as_deref()
    }
}
