//! Configuration types for supportdesk.
//!
//! `FileConfig` represents the optional `config.toml` in the data directory.
//! Its `[chat]` table carries the conversation policy values that would
//! otherwise be hardcoded: history window, output token cap, and the
//! maximum inbound message length.

use serde::{Deserialize, Serialize};

/// Top-level contents of `config.toml`.
///
/// Loaded from `~/.supportdesk/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Conversation policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Number of most recent turns passed to the model as context.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Output token cap for each generated reply.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Maximum accepted length of an inbound message, in characters.
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,

    /// HTTP timeout for a single LLM call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_history_window() -> usize {
    10
}

fn default_max_output_tokens() -> u32 {
    150
}

fn default_max_message_chars() -> usize {
    5000
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            max_output_tokens: default_max_output_tokens(),
            max_message_chars: default_max_message_chars(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
