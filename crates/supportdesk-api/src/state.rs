//! Application state wiring the conversation service together.
//!
//! `ConversationService` is generic over its repository; AppState pins it
//! to the SQLite implementation and shares it across handlers.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use supportdesk_core::chat::service::ConversationService;
use supportdesk_core::reply::ReplyGenerator;
use supportdesk_infra::config::{api_key_from_env, load_file_config};
use supportdesk_infra::llm::{create_provider, ProviderSettings};
use supportdesk_infra::sqlite::chat::SqliteChatRepository;
use supportdesk_infra::sqlite::pool::{database_url_for, DatabasePool};

use crate::cli::ServeArgs;

/// Conversation service pinned to the SQLite repository.
pub type ConcreteConversationService = ConversationService<SqliteChatRepository>;

/// Shared application state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub conversation: Arc<ConcreteConversationService>,
}

impl AppState {
    pub fn new(conversation: ConcreteConversationService) -> Self {
        Self {
            conversation: Arc::new(conversation),
        }
    }

    /// Initialize the application state: load config, connect to the DB,
    /// build the LLM provider, wire the service.
    ///
    /// Fails when the provider credential is missing.
    pub async fn init(args: &ServeArgs, data_dir: &Path) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let file_config = load_file_config(data_dir).await;
        let chat_config = file_config.chat;

        let api_key = api_key_from_env(args.provider)?;

        let mut settings = ProviderSettings::new(
            args.provider,
            Duration::from_secs(chat_config.request_timeout_secs),
        );
        if let Some(model) = &args.model {
            settings.model = model.clone();
        }
        settings.base_url = args.llm_base_url.clone();

        let provider = create_provider(&settings, api_key)?;
        tracing::info!(
            provider = provider.name(),
            model = provider.model(),
            history_window = chat_config.history_window,
            max_output_tokens = chat_config.max_output_tokens,
            "LLM provider ready"
        );

        let db_url = args
            .database_url
            .clone()
            .unwrap_or_else(|| database_url_for(data_dir));
        let pool = DatabasePool::new(&db_url).await?;

        let generator = ReplyGenerator::new(provider, chat_config.max_output_tokens);
        let conversation =
            ConversationService::new(SqliteChatRepository::new(pool), generator, chat_config);

        Ok(Self::new(conversation))
    }
}
