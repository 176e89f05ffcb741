use thiserror::Error;

/// Errors from repository operations (used by trait definitions in supportdesk-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Rejections for an inbound user message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Message cannot be empty")]
    Empty,

    #[error("Message too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("Session ID is required")]
    MissingSessionId,
}

/// Errors surfaced by the conversation service.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Startup configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{env_var} is not defined in the environment")]
    MissingApiKey { env_var: String },
}
