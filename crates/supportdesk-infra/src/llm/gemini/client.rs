//! GeminiProvider -- concrete [`LlmProvider`] implementation for the
//! Google Generative Language API.
//!
//! Sends non-streaming requests to
//! `/v1beta/models/{model}:generateContent`. The API key travels in the
//! `x-goog-api-key` header and is only exposed while building it.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use supportdesk_core::llm::provider::LlmProvider;
use supportdesk_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, StopReason, Usage,
};

use super::types::{GeminiContent, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::llm::error_for_status;

/// Google Gemini / Gemma LLM provider.
///
/// Does not derive `Debug`; the key lives in a [`SecretString`].
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    /// Model turn that follows an inlined instruction.
    pub const INSTRUCTION_ACK: &'static str = "Understood. I am ready to help.";

    /// Create a new Gemini provider whose HTTP calls give up after `timeout`.
    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// Override the base URL (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Gemma models reject `systemInstruction`; the instruction is sent as
    /// the opening user turn instead.
    fn inlines_instruction(&self) -> bool {
        self.model.starts_with("gemma")
    }

    /// Convert a generic [`CompletionRequest`] into a Gemini request body.
    fn to_gemini_request(&self, request: &CompletionRequest) -> GenerateContentRequest {
        let mut contents = Vec::with_capacity(request.messages.len() + 2);
        let mut system_instruction = None;

        if let Some(system) = &request.system {
            if self.inlines_instruction() {
                contents.push(GeminiContent::text(Some("user"), system.clone()));
                contents.push(GeminiContent::text(Some("model"), Self::INSTRUCTION_ACK));
            } else {
                system_instruction = Some(GeminiContent::text(None, system.clone()));
            }
        }

        contents.extend(request.messages.iter().map(|m| {
            let role = match m.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "model",
            };
            GeminiContent::text(Some(role), m.content.clone())
        }));

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            },
        }
    }
}

fn map_finish_reason(reason: Option<&str>) -> StopReason {
    match reason {
        Some("STOP") | None => StopReason::EndTurn,
        Some("MAX_TOKENS") => StopReason::MaxTokens,
        Some("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII") => {
            StopReason::Safety
        }
        Some(_) => StopReason::Other,
    }
}

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_gemini_request(request);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, error_body));
        }

        let gemini_resp: GenerateContentResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        let usage = gemini_resp.usage_metadata.clone().unwrap_or_default();

        Ok(CompletionResponse {
            content: gemini_resp.text(),
            model: gemini_resp
                .model_version
                .clone()
                .unwrap_or_else(|| self.model.clone()),
            stop_reason: map_finish_reason(gemini_resp.finish_reason()),
            usage: Usage {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage.candidates_token_count,
            },
        })
    }
}
