//! CLI command definitions for the `supportdesk` binary.
//!
//! Uses clap derive macros for argument parsing. Every server option can
//! also come from the environment.

pub mod chat;
pub mod history;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use supportdesk_types::llm::ProviderType;

/// Default port when neither `--port` nor `PORT` is given.
pub const DEFAULT_PORT: u16 = 3000;

/// Customer-support chat server and terminal client.
#[derive(Parser)]
#[command(name = "supportdesk", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry to stdout.
    #[arg(long, global = true, env = "SUPPORTDESK_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve(ServeArgs),

    /// Chat with the support agent from the terminal.
    Chat(ClientArgs),

    /// Print the turns of a conversation.
    History {
        #[command(flatten)]
        client: ClientArgs,

        /// Session to show; defaults to the one remembered by `chat`.
        #[arg(long)]
        session_id: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Options of `supportdesk serve`.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Host to bind to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on [default: 3000].
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// SQLite URL; defaults to `supportdesk.db` in the data directory.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// LLM backend.
    #[arg(long, env = "LLM_PROVIDER", default_value_t = ProviderType::Gemini)]
    pub provider: ProviderType,

    /// Model identifier; defaults to the provider's default model.
    #[arg(long, env = "LLM_MODEL")]
    pub model: Option<String>,

    /// Override the provider endpoint.
    #[arg(long, env = "LLM_BASE_URL")]
    pub llm_base_url: Option<String>,
}

/// Options shared by the client commands.
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// Base URL of the supportdesk server.
    #[arg(long, env = "SUPPORTDESK_SERVER_URL", default_value = "http://localhost:3000")]
    pub server_url: String,
}
