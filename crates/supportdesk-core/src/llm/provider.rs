//! LlmProvider trait definition.
//!
//! This is the core abstraction that every LLM backend implements.

use supportdesk_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (Gemini, Anthropic, ...).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition) for
/// `complete`. Implementations live in supportdesk-infra.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini", "anthropic").
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
