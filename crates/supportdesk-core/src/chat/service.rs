//! Conversation service orchestrating session resolution, turn
//! persistence, and reply generation.
//!
//! One call to [`ConversationService::handle`] performs, in order:
//! resolve (or create) the session, append the user turn, load the
//! bounded history window, generate a reply, append the agent turn.
//! The two appends are independent writes: if the second fails, the
//! user turn stays in the history without an answer.

use supportdesk_types::chat::{ChatReply, Session, Turn};
use supportdesk_types::config::ChatConfig;
use supportdesk_types::error::{ChatError, RepositoryError, ValidationError};
use tracing::{debug, info};

use crate::chat::repository::ChatRepository;
use crate::chat::validate::{normalize_session_id, validate_message};
use crate::reply::ReplyGenerator;

/// Orchestrates a support conversation over a repository and a reply generator.
///
/// Generic over `ChatRepository` to maintain clean architecture
/// (supportdesk-core never depends on supportdesk-infra).
pub struct ConversationService<R: ChatRepository> {
    repo: R,
    generator: ReplyGenerator,
    config: ChatConfig,
}

impl<R: ChatRepository> ConversationService<R> {
    /// Create a new conversation service.
    pub fn new(repo: R, generator: ReplyGenerator, config: ChatConfig) -> Self {
        Self {
            repo,
            generator,
            config,
        }
    }

    /// Validate an inbound message against the configured length limit.
    pub fn validate(&self, message: &str) -> Result<(), ValidationError> {
        validate_message(message, self.config.max_message_chars)
    }

    /// Resolve the session a message belongs to, creating it if needed.
    ///
    /// - No id (or a blank one): mint a new id and create the session.
    /// - Known id: use it.
    /// - Unknown id: create a session under that id.
    pub async fn resolve_session(&self, session_id: Option<&str>) -> Result<String, RepositoryError> {
        let session = match normalize_session_id(session_id) {
            None => Session::mint(),
            Some(id) => {
                if self.repo.get_session(id).await?.is_some() {
                    return Ok(id.to_string());
                }
                Session::with_id(id)
            }
        };

        let created = self.repo.create_session(&session).await?;
        if created {
            info!(session_id = %session.id, "Session created");
        }
        Ok(session.id)
    }

    /// Handle one user message and return the agent's reply.
    ///
    /// Expects `message` to have passed [`Self::validate`]. Repository
    /// failures propagate; LLM failures never do.
    pub async fn handle(
        &self,
        message: &str,
        session_id: Option<&str>,
    ) -> Result<ChatReply, ChatError> {
        let session_id = self.resolve_session(session_id).await?;

        self.repo.append_turn(&Turn::user(&session_id, message)).await?;

        let window = self
            .repo
            .get_recent_turns(&session_id, self.config.history_window)
            .await?;
        debug!(session_id = %session_id, window = window.len(), "History window loaded");

        let reply = self.generator.generate(&window).await;
        let fallback = reply.is_fallback();
        let reply = reply.into_text();

        self.repo.append_turn(&Turn::agent(&session_id, &reply)).await?;

        info!(session_id = %session_id, fallback, "Message handled");

        Ok(ChatReply { reply, session_id })
    }

    /// All turns of a session in conversation order; empty when unknown.
    pub async fn history(&self, session_id: &str) -> Result<Vec<Turn>, ChatError> {
        Ok(self.repo.get_turns(session_id).await?)
    }
}
