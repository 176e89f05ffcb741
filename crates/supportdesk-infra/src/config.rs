//! Configuration loading for supportdesk.
//!
//! Resolves the data directory, reads the optional `config.toml` into a
//! [`FileConfig`], and resolves the LLM credential. The file falls back to
//! defaults when it is missing or malformed; a missing credential is fatal.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use supportdesk_types::config::{ChatConfig, FileConfig};
use supportdesk_types::error::ConfigError;
use supportdesk_types::llm::ProviderType;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "SUPPORTDESK_DATA_DIR";

const MIN_HISTORY_WINDOW: usize = 1;
const MIN_OUTPUT_TOKENS: u32 = 16;
const MIN_MESSAGE_CHARS: usize = 1;
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `SUPPORTDESK_DATA_DIR` environment variable
/// 2. `~/.supportdesk`
/// 3. `.supportdesk` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".supportdesk");
    }

    PathBuf::from(".supportdesk")
}

/// Load `{data_dir}/config.toml`.
///
/// - Missing file: [`FileConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
/// - Otherwise the parsed config, with chat values raised to their floors.
pub async fn load_file_config(data_dir: &Path) -> FileConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return FileConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return FileConfig::default();
        }
    };

    match toml::from_str::<FileConfig>(&content) {
        Ok(mut config) => {
            config.chat = clamp_chat_config(config.chat);
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            FileConfig::default()
        }
    }
}

/// Raise every chat value to its minimum.
pub fn clamp_chat_config(chat: ChatConfig) -> ChatConfig {
    ChatConfig {
        history_window: chat.history_window.max(MIN_HISTORY_WINDOW),
        max_output_tokens: chat.max_output_tokens.max(MIN_OUTPUT_TOKENS),
        max_message_chars: chat.max_message_chars.max(MIN_MESSAGE_CHARS),
        request_timeout_secs: chat.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS),
    }
}

/// Turn a raw credential value into a secret, rejecting absent or blank ones.
pub fn resolve_api_key(
    provider_type: ProviderType,
    value: Option<String>,
) -> Result<SecretString, ConfigError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(SecretString::from(key.trim().to_string())),
        _ => Err(ConfigError::MissingApiKey {
            env_var: provider_type.api_key_env().to_string(),
        }),
    }
}

/// Read the credential for `provider_type` from its environment variable.
pub fn api_key_from_env(provider_type: ProviderType) -> Result<SecretString, ConfigError> {
    resolve_api_key(
        provider_type,
        std::env::var(provider_type.api_key_env()).ok(),
    )
}
