//! supportdesk CLI and HTTP API entry point.
//!
//! Binary name: `supportdesk`
//!
//! Parses CLI arguments, initializes tracing, then either starts the HTTP
//! server or runs one of the terminal client commands.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use supportdesk_infra::config::resolve_data_dir;
use supportdesk_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{Cli, Commands, ServeArgs, DEFAULT_PORT};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need logging or state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "supportdesk", &mut std::io::stdout());
        return Ok(());
    }

    // The terminal client stays quiet unless asked; the server logs at info.
    let default_filter = match cli.command {
        Commands::Serve(_) => filter_for_verbosity(cli.verbose, cli.quiet),
        _ if cli.verbose == 0 => "warn",
        _ => filter_for_verbosity(cli.verbose, cli.quiet),
    };
    init_tracing(default_filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let data_dir = resolve_data_dir();

    let result = match cli.command {
        Commands::Serve(args) => serve(args, &data_dir).await,
        Commands::Chat(client) => cli::chat::loop_runner::run_chat_loop(&client.server_url, &data_dir).await,
        Commands::History { client, session_id } => {
            cli::history::show_history(&client.server_url, &data_dir, session_id).await
        }
        Commands::Completions { .. } => Ok(()),
    };

    shutdown_tracing();
    result
}

/// Bind the listener and serve until Ctrl+C or SIGTERM.
async fn serve(args: ServeArgs, data_dir: &std::path::Path) -> anyhow::Result<()> {
    let port = args.port.unwrap_or_else(|| {
        tracing::info!("PORT is not defined in the environment, using default port {DEFAULT_PORT}");
        DEFAULT_PORT
    });

    let state = AppState::init(&args, data_dir).await?;

    let addr = format!("{}:{port}", args.host);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, data_dir = %data_dir.display(), "Server running");

    println!(
        "  {} supportdesk API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
