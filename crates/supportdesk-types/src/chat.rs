//! Chat session and turn types for supportdesk.
//!
//! These types model a support conversation: a session identified by an
//! opaque token, and the append-only list of turns exchanged within it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who authored a turn.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('user', 'agent'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Agent => write!(f, "agent"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "agent" => Ok(Sender::Agent),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A support conversation.
///
/// Sessions are created lazily on the first message and never deleted.
/// The identifier is opaque: the server mints UUID v7 strings, but any
/// non-blank token supplied by a client is accepted verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// A session with a freshly minted identifier.
    pub fn mint() -> Self {
        Self::with_id(Uuid::now_v7().to_string())
    }

    /// A session under a caller-supplied identifier.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
        }
    }
}

/// A single message within a session.
///
/// Turns are immutable once written. Conversation order is `timestamp`
/// ascending, with insertion order breaking ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub id: Uuid,
    pub session_id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Build a new turn stamped with the current time.
    pub fn new(session_id: impl Into<String>, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id: session_id.into(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(session_id, Sender::User, text)
    }

    pub fn agent(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(session_id, Sender::Agent, text)
    }
}

/// Result of handling one inbound user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    pub session_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::User, Sender::Agent] {
            let s = sender.to_string();
            let parsed: Sender = s.parse().unwrap();
            assert_eq!(sender, parsed);
        }
    }

    #[test]
    fn test_sender_rejects_unknown() {
        let err = "ai".parse::<Sender>().unwrap_err();
        assert!(err.contains("ai"));
    }

    #[test]
    fn test_turn_wire_format() {
        let turn = Turn::user("abc", "What is your return policy?");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["sessionId"], "abc");
        assert_eq!(json["sender"], "user");
        assert_eq!(json["text"], "What is your return policy?");
        assert!(json["timestamp"].is_string());
        assert!(json.get("session_id").is_none());
    }

    #[test]
    fn test_minted_sessions_are_distinct() {
        let a = Session::mint();
        let b = Session::mint();
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn test_chat_reply_wire_format() {
        let reply = ChatReply {
            reply: "Hello".to_string(),
            session_id: "s-1".to_string(),
        };
        let json = serde_json::to_string(&reply).unwrap();
        assert_eq!(json, r#"{"reply":"Hello","sessionId":"s-1"}"#);
    }
}
