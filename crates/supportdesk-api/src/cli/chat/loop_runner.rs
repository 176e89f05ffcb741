//! Main chat loop of the terminal widget.
//!
//! Restores the remembered conversation (or greets), then reads lines,
//! posts them to the server and prints the agent's replies until the
//! user quits.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline_async::SharedWriter;

use super::banner::{self, GREETING, TRANSPORT_ERROR_REPLY};
use super::client::{Rejected, SupportClient};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::session_file::SessionFile;

/// Run an interactive chat against `server_url`.
pub async fn run_chat_loop(server_url: &str, data_dir: &Path) -> anyhow::Result<()> {
    let client = SupportClient::new(server_url)?;
    let session_file = SessionFile::new(data_dir);
    let mut session_id = session_file.load().await?;

    banner::print_welcome_banner(client.base_url(), session_id.as_deref());

    let prompt = format!("  {} ", style("You   >").green().bold());
    let (mut chat_input, mut out) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    restore_or_greet(&client, session_id.as_deref(), &mut out).await?;

    loop {
        let text = match chat_input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                writeln!(out, "  {}", style("Press Ctrl+D to exit, or keep chatting.").dim())?;
                continue;
            }
            InputEvent::Message(text) => text,
        };

        if text.is_empty() {
            continue;
        }

        if let Some(cmd) = commands::parse(&text) {
            match cmd {
                ChatCommand::Help => commands::print_help(&mut out)?,
                ChatCommand::Clear => chat_input.clear(),
                ChatCommand::Quit => break,
                ChatCommand::New => {
                    session_file.clear().await?;
                    session_id = None;
                    writeln!(out, "\n  {}\n", style("Started a new conversation.").dim())?;
                    writeln!(out, "{}", banner::format_agent(GREETING))?;
                }
                ChatCommand::History => {
                    restore_or_greet(&client, session_id.as_deref(), &mut out).await?;
                }
                ChatCommand::Unknown(name) => {
                    writeln!(
                        out,
                        "  {} Unknown command: {}. Type /help for available commands.",
                        style("?").yellow().bold(),
                        style(name).dim()
                    )?;
                }
            }
            continue;
        }

        let spinner = typing_spinner();
        let result = client.send(&text, session_id.as_deref()).await;
        spinner.finish_and_clear();

        match result {
            Ok(reply) => {
                if session_id.is_none() {
                    if let Err(e) = session_file.save(&reply.session_id).await {
                        tracing::warn!(error = %e, path = %session_file.path().display(), "Could not remember session");
                    }
                    session_id = Some(reply.session_id);
                }
                writeln!(out, "{}", banner::format_agent(&reply.reply))?;
            }
            Err(e) => match e.downcast_ref::<Rejected>() {
                Some(Rejected(reason)) => {
                    writeln!(out, "  {} {}", style("!").yellow().bold(), reason)?;
                }
                None => {
                    tracing::debug!(error = %e, "Message delivery failed");
                    writeln!(out, "{}", banner::format_agent(TRANSPORT_ERROR_REPLY))?;
                }
            },
        }
    }

    writeln!(out, "\n  {}", style("Chat ended.").dim())?;
    chat_input.flush();
    Ok(())
}

/// Print the stored conversation, or the greeting when there is none.
///
/// A failed history fetch is not fatal; the user can still chat.
async fn restore_or_greet(
    client: &SupportClient,
    session_id: Option<&str>,
    out: &mut SharedWriter,
) -> anyhow::Result<()> {
    let turns = match session_id {
        Some(id) => match client.history(id).await {
            Ok(turns) => turns,
            Err(e) => {
                tracing::warn!(error = %e, "Could not load conversation history");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    if turns.is_empty() {
        writeln!(out, "{}", banner::format_agent(GREETING))?;
    } else {
        for turn in &turns {
            writeln!(out, "{}", banner::format_turn(turn))?;
        }
    }
    Ok(())
}

fn typing_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Agent is typing...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
