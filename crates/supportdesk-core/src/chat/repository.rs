//! ChatRepository trait definition.
//!
//! The session store contract: sessions keyed by an opaque token, each
//! owning an append-only, ordered list of turns.

use supportdesk_types::chat::{Session, Turn};
use supportdesk_types::error::RepositoryError;

/// Repository trait for session and turn persistence.
///
/// Implementations live in supportdesk-infra (e.g., `SqliteChatRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// Create a session unless one with the same id already exists.
    ///
    /// Returns `true` when a row was inserted, `false` when the id was
    /// already present. Never fails on a duplicate id.
    fn create_session(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Get a session by its id.
    fn get_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// Append a turn to its session. Turns are never updated afterwards.
    fn append_turn(
        &self,
        turn: &Turn,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All turns of a session in conversation order.
    ///
    /// Returns an empty list for an unknown session.
    fn get_turns(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, RepositoryError>> + Send;

    /// The `limit` most recent turns of a session, in conversation order.
    fn get_recent_turns(
        &self,
        session_id: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, RepositoryError>> + Send;
}
