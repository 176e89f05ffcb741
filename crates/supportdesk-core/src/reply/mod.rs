//! Reply generation for the support agent.
//!
//! `ReplyGenerator` turns a bounded history window into a single LLM call
//! and normalizes every outcome into text. Failures never propagate: they
//! become a [`Reply::Fallback`] carrying a fixed user-facing string and the
//! reason, so callers and tests can tell a real answer from an apology.

pub mod generator;
pub mod prompt;

use std::fmt;

pub use generator::ReplyGenerator;

/// Asked when there is no user message to answer.
pub const CLARIFYING_REPLY: &str = "How can I help you regarding our products?";

/// Used when the model returns no text.
pub const EMPTY_REPLY: &str = "I'm sorry, I couldn't generate a response.";

/// Used when the model call fails.
pub const UNAVAILABLE_REPLY: &str =
    "I'm having trouble connecting to my brain right now. Please try again later.";

/// Why a fallback reply was used instead of generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The history window did not end on a user turn.
    NoUserTurn,
    /// The provider answered with empty content.
    EmptyResponse,
    /// The provider call failed.
    Provider(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::NoUserTurn => write!(f, "no user turn"),
            FallbackReason::EmptyResponse => write!(f, "empty response"),
            FallbackReason::Provider(e) => write!(f, "provider failure: {e}"),
        }
    }
}

/// Outcome of a reply generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Generated(String),
    Fallback { text: String, reason: FallbackReason },
}

impl Reply {
    pub(crate) fn fallback(reason: FallbackReason) -> Self {
        let text = match reason {
            FallbackReason::NoUserTurn => CLARIFYING_REPLY,
            FallbackReason::EmptyResponse => EMPTY_REPLY,
            FallbackReason::Provider(_) => UNAVAILABLE_REPLY,
        };
        Reply::Fallback {
            text: text.to_string(),
            reason,
        }
    }

    /// The text shown to the user.
    pub fn text(&self) -> &str {
        match self {
            Reply::Generated(text) => text,
            Reply::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Reply::Generated(text) => text,
            Reply::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Reply::Fallback { .. })
    }
}
