//! LLM provider implementations.
//!
//! Contains concrete implementations of the [`LlmProvider`] trait defined
//! in `supportdesk-core`: Google Gemini (the default) and Anthropic Claude.
//!
//! Also provides a provider factory ([`create_provider`]) that constructs
//! the right provider from [`ProviderSettings`].
//!
//! [`LlmProvider`]: supportdesk_core::llm::provider::LlmProvider

pub mod anthropic;
pub mod gemini;

use std::time::Duration;

use reqwest::StatusCode;
use secrecy::SecretString;

use supportdesk_core::llm::box_provider::BoxLlmProvider;
use supportdesk_types::llm::{LlmError, ProviderType};

use self::anthropic::AnthropicProvider;
use self::gemini::GeminiProvider;

/// Everything needed to construct a provider except the credential.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub provider_type: ProviderType,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl ProviderSettings {
    /// Settings for `provider_type` with its default model and endpoint.
    pub fn new(provider_type: ProviderType, timeout: Duration) -> Self {
        Self {
            provider_type,
            model: provider_type.default_model().to_string(),
            base_url: None,
            timeout,
        }
    }
}

/// Create a [`BoxLlmProvider`] from [`ProviderSettings`] and a resolved key.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn create_provider(
    settings: &ProviderSettings,
    api_key: SecretString,
) -> Result<BoxLlmProvider, LlmError> {
    match settings.provider_type {
        ProviderType::Gemini => {
            let mut provider = GeminiProvider::new(api_key, settings.model.clone(), settings.timeout)?;
            if let Some(base_url) = &settings.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Ok(BoxLlmProvider::new(provider))
        }
        ProviderType::Anthropic => {
            let mut provider =
                AnthropicProvider::new(api_key, settings.model.clone(), settings.timeout)?;
            if let Some(base_url) = &settings.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            Ok(BoxLlmProvider::new(provider))
        }
    }
}

/// Map a non-success HTTP status from a provider to an [`LlmError`].
pub(crate) fn error_for_status(status: StatusCode, body: String) -> LlmError {
    match status.as_u16() {
        401 | 403 => LlmError::AuthenticationFailed,
        429 => LlmError::RateLimited,
        503 | 529 => LlmError::Overloaded(body),
        400 => LlmError::InvalidRequest(body),
        _ => LlmError::Provider {
            message: format!("HTTP {status}: {body}"),
        },
    }
}
