//! Chat session, message, rating and debug log types for chatsync.
//!
//! These types model the gateway's view of a conversation. Field names follow
//! the gateway's camelCase wire format; unknown fields are ignored so the
//! gateway can grow its records without breaking older clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;

/// Author of a message.
///
/// The gateway reports the sender role as free text: `"User"` for the human,
/// and either `"Assistant"` or an agent name for generated replies. Anything
/// that is not a user or system marker decodes as [`MessageRole::Assistant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageRole {
    User,
    #[default]
    Assistant,
    System,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
            MessageRole::System => write!(f, "system"),
        }
    }
}

impl From<String> for MessageRole {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "user" => MessageRole::User,
            "system" => MessageRole::System,
            _ => MessageRole::Assistant,
        }
    }
}

impl From<MessageRole> for String {
    fn from(role: MessageRole) -> Self {
        role.to_string()
    }
}

/// Tri-state user rating of a message.
///
/// On the wire this is a nullable boolean: `true`, `false`, or `null`/absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Rating {
    #[default]
    Unset,
    Positive,
    Negative,
}

impl Rating {
    /// The boolean carried on the wire, if any.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Rating::Unset => None,
            Rating::Positive => Some(true),
            Rating::Negative => Some(false),
        }
    }
}

impl From<Option<bool>> for Rating {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Rating::Unset,
            Some(true) => Rating::Positive,
            Some(false) => Rating::Negative,
        }
    }
}

impl From<Rating> for Option<bool> {
    fn from(rating: Rating) -> Self {
        rating.as_bool()
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Unset => write!(f, "unset"),
            Rating::Positive => write!(f, "positive"),
            Rating::Negative => write!(f, "negative"),
        }
    }
}

/// A chat session as known to the client.
///
/// The identifier is always assigned by the gateway. `messages` stays `None`
/// until the session's messages are fetched for the first time.
///
/// Decodes from `sessionId`, or from `id` when the gateway sends only the
/// document id. Encodes as `sessionId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SessionRecord")]
pub struct Session {
    pub session_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tenant_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
}

/// Session as it arrives from the gateway, before the identifier is settled.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    session_id: Option<String>,
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    tenant_id: String,
    #[serde(default)]
    user_id: String,
    #[serde(default)]
    tokens_used: Option<u64>,
    #[serde(default)]
    messages: Option<Vec<Message>>,
}

impl TryFrom<SessionRecord> for Session {
    type Error = String;

    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let session_id = record
            .session_id
            .or(record.id)
            .ok_or_else(|| "missing field `sessionId` (or `id`)".to_string())?;
        Ok(Self {
            session_id,
            name: record.name,
            tenant_id: record.tenant_id,
            user_id: record.user_id,
            tokens_used: record.tokens_used,
            messages: record.messages,
        })
    }
}

impl Session {
    /// Whether this session's messages have been loaded at least once.
    pub fn messages_loaded(&self) -> bool {
        self.messages.is_some()
    }
}

/// One turn in a session.
///
/// `session_id` is a back-reference to the parent session, not ownership.
/// The role decodes from `senderRole`, or from `role` when that is all the
/// gateway sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MessageRecord")]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub sender_role: MessageRole,
    /// Display name of the author (agent name for generated replies).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u64>,
    /// Completion details record for this message, if the gateway kept one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageRecord {
    id: String,
    #[serde(default)]
    session_id: String,
    sender_role: Option<MessageRole>,
    role: Option<MessageRole>,
    #[serde(default)]
    sender: Option<String>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    rating: Rating,
    #[serde(default)]
    time_stamp: Option<DateTime<Utc>>,
    #[serde(default)]
    tokens_used: Option<u64>,
    #[serde(default)]
    debug_log_id: Option<String>,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Self {
            id: record.id,
            session_id: record.session_id,
            sender_role: record.sender_role.or(record.role).unwrap_or_default(),
            sender: record.sender,
            text: record.text,
            rating: record.rating,
            time_stamp: record.time_stamp,
            tokens_used: record.tokens_used,
            debug_log_id: record.debug_log_id,
        }
    }
}

/// Completion diagnostics recorded by the gateway for one assistant reply.
///
/// The property bags and details are opaque to the client and kept as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugLog {
    pub id: String,
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_stamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub property_bags: serde_json::Value,
    #[serde(default)]
    pub debug_details: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_from_gateway_text() {
        assert_eq!(MessageRole::from("User".to_string()), MessageRole::User);
        assert_eq!(MessageRole::from("system".to_string()), MessageRole::System);
        assert_eq!(
            MessageRole::from("Coordinator".to_string()),
            MessageRole::Assistant
        );
    }

    #[test]
    fn test_session_decode_accepts_plain_id() {
        let session: Session = serde_json::from_str(r#"{"id":"s1","name":"Chat 1"}"#).unwrap();
        assert_eq!(session.session_id, "s1");
        assert_eq!(session.name, "Chat 1");

        let encoded = serde_json::to_value(&session).unwrap();
        assert_eq!(encoded["sessionId"], "s1");
    }

    #[test]
    fn test_session_decode_without_any_id_fails() {
        let result = serde_json::from_str::<Session>(r#"{"name":"Chat 1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_message_decode_accepts_role_field() {
        let message: Message =
            serde_json::from_str(r#"{"id":"m1","role":"user","text":"hi"}"#).unwrap();
        assert_eq!(message.sender_role, MessageRole::User);

        let json = r#"{"id":"m2","senderRole":"System","role":"user","text":"x"}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.sender_role, MessageRole::System);

        let message: Message = serde_json::from_str(r#"{"id":"m3","text":"x"}"#).unwrap();
        assert_eq!(message.sender_role, MessageRole::Assistant);
    }

    #[test]
    fn test_rating_wire_values() {
        let json = serde_json::to_string(&Rating::Positive).unwrap();
        assert_eq!(json, "true");
        let json = serde_json::to_string(&Rating::Unset).unwrap();
        assert_eq!(json, "null");
        let parsed: Rating = serde_json::from_str("false").unwrap();
        assert_eq!(parsed, Rating::Negative);
    }

    #[test]
    fn test_session_decode_ignores_unknown_fields() {
        let json = r#"{
            "id": "doc-1",
            "type": "session",
            "sessionId": "s1",
            "tenantId": "T1",
            "userId": "U1",
            "tokensUsed": 42,
            "name": "Chat 1",
            "someFutureField": {"nested": true}
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.session_id, "s1");
        assert_eq!(session.name, "Chat 1");
        assert_eq!(session.tokens_used, Some(42));
        assert!(!session.messages_loaded());
    }

    #[test]
    fn test_message_decode_absent_rating_is_unset() {
        let json = r#"{
            "id": "m1",
            "sessionId": "s1",
            "senderRole": "Assistant",
            "sender": "Sales",
            "text": "Hi there",
            "timeStamp": "2025-01-02T03:04:05Z"
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.rating, Rating::Unset);
        assert_eq!(message.sender_role, MessageRole::Assistant);
        assert_eq!(message.sender.as_deref(), Some("Sales"));
        assert!(message.time_stamp.is_some());
    }

    #[test]
    fn test_message_decode_null_rating() {
        let json = r#"{"id": "m1", "text": "x", "rating": null}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.rating, Rating::Unset);
    }

    #[test]
    fn test_debug_log_keeps_opaque_details() {
        let json = r#"{
            "id": "d1",
            "messageId": "m1",
            "sessionId": "s1",
            "propertyBags": [{"key": "agent", "value": "Sales"}],
            "debugDetails": [{"prompt": "..."}]
        }"#;
        let log: DebugLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.message_id, "m1");
        assert!(log.property_bags.is_array());
    }
}
