//! ReplyGenerator -- one LLM call per user message, never failing.

use std::time::Instant;

use tracing::{debug, warn};

use supportdesk_types::chat::Turn;

use super::prompt::SupportPromptBuilder;
use super::{FallbackReason, Reply};
use crate::llm::box_provider::BoxLlmProvider;

/// Generates agent replies from a bounded history window.
pub struct ReplyGenerator {
    provider: BoxLlmProvider,
    max_output_tokens: u32,
}

impl ReplyGenerator {
    pub fn new(provider: BoxLlmProvider, max_output_tokens: u32) -> Self {
        Self {
            provider,
            max_output_tokens,
        }
    }

    /// Generate a reply for the window, which must end on the user turn
    /// being answered.
    ///
    /// Never fails. Provider errors and empty answers become
    /// [`Reply::Fallback`]; a window without a trailing user turn is
    /// answered with a clarifying prompt and the provider is not called.
    pub async fn generate(&self, history: &[Turn]) -> Reply {
        let Some(request) = SupportPromptBuilder::build(history, self.max_output_tokens) else {
            debug!(turns = history.len(), "No user turn to answer, skipping provider call");
            return Reply::fallback(FallbackReason::NoUserTurn);
        };

        let start = Instant::now();
        match self.provider.complete(&request).await {
            Ok(response) => {
                debug!(
                    provider = self.provider.name(),
                    model = %response.model,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    stop_reason = %response.stop_reason,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Reply generated"
                );
                let text = response.content.trim();
                if text.is_empty() {
                    warn!(provider = self.provider.name(), "Provider returned an empty reply");
                    Reply::fallback(FallbackReason::EmptyResponse)
                } else {
                    Reply::Generated(text.to_string())
                }
            }
            Err(e) => {
                warn!(
                    provider = self.provider.name(),
                    model = self.provider.model(),
                    error = %e,
                    "LLM call failed, replying with fallback"
                );
                Reply::fallback(FallbackReason::Provider(e.to_string()))
            }
        }
    }
}
