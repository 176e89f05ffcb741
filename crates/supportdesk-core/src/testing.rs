//! In-memory test doubles for the repository and provider ports.

use std::sync::{Arc, Mutex};

use supportdesk_types::chat::{Sender, Session, Turn};
use supportdesk_types::error::RepositoryError;
use supportdesk_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, StopReason, Usage,
};

use crate::chat::repository::ChatRepository;
use crate::llm::provider::LlmProvider;

#[derive(Clone)]
pub enum MockResult {
    Reply(String),
    Error(String),
}

/// Scripted provider that records every request it receives.
pub struct MockProvider {
    result: MockResult,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            result: MockResult::Reply(text.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: MockResult::Error(message.to_string()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the recorded requests; stays valid after boxing.
    pub fn requests(&self) -> Arc<Mutex<Vec<CompletionRequest>>> {
        Arc::clone(&self.requests)
    }
}

impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.result {
            MockResult::Reply(text) => Ok(CompletionResponse {
                content: text.clone(),
                model: "mock-model".to_string(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            }),
            MockResult::Error(message) => Err(LlmError::Provider {
                message: message.clone(),
            }),
        }
    }
}

#[derive(Default)]
struct Store {
    sessions: Vec<Session>,
    turns: Vec<Turn>,
}

/// Vec-backed repository with optional write failures.
#[derive(Clone, Default)]
pub struct MockChatRepository {
    store: Arc<Mutex<Store>>,
    fail_agent_turns: bool,
    fail_all: bool,
}

impl MockChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every `agent` turn append; user turns still succeed.
    pub fn failing_agent_turns() -> Self {
        Self {
            fail_agent_turns: true,
            ..Self::default()
        }
    }

    /// Reject every operation.
    pub fn unavailable() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn session_count(&self) -> usize {
        self.store.lock().unwrap().sessions.len()
    }

    pub fn turns(&self, session_id: &str) -> Vec<Turn> {
        self.store
            .lock()
            .unwrap()
            .turns
            .iter()
            .filter(|t| t.session_id == session_id)
            .cloned()
            .collect()
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.fail_all {
            Err(RepositoryError::Connection)
        } else {
            Ok(())
        }
    }
}

impl ChatRepository for MockChatRepository {
    async fn create_session(&self, session: &Session) -> Result<bool, RepositoryError> {
        self.check_available()?;
        let mut store = self.store.lock().unwrap();
        if store.sessions.iter().any(|s| s.id == session.id) {
            return Ok(false);
        }
        store.sessions.push(session.clone());
        Ok(true)
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<Session>, RepositoryError> {
        self.check_available()?;
        let store = self.store.lock().unwrap();
        Ok(store.sessions.iter().find(|s| s.id == session_id).cloned())
    }

    async fn append_turn(&self, turn: &Turn) -> Result<(), RepositoryError> {
        self.check_available()?;
        if self.fail_agent_turns && turn.sender == Sender::Agent {
            return Err(RepositoryError::Query("disk I/O error".to_string()));
        }
        let mut store = self.store.lock().unwrap();
        if !store.sessions.iter().any(|s| s.id == turn.session_id) {
            return Err(RepositoryError::Query("FOREIGN KEY constraint failed".to_string()));
        }
        store.turns.push(turn.clone());
        Ok(())
    }

    async fn get_turns(&self, session_id: &str) -> Result<Vec<Turn>, RepositoryError> {
        self.check_available()?;
        Ok(self.turns(session_id))
    }

    async fn get_recent_turns(
        &self,
        session_id: &str,
        limit: usize,
    ) -> Result<Vec<Turn>, RepositoryError> {
        self.check_available()?;
        let turns = self.turns(session_id);
        let skip = turns.len().saturating_sub(limit);
        Ok(turns.into_iter().skip(skip).collect())
    }
}
