//! `supportdesk history` -- print one conversation from the server.

use std::path::Path;

use console::style;

use super::chat::banner::format_turn;
use super::chat::client::SupportClient;
use super::chat::session_file::SessionFile;

/// Print the turns of `session_id`, or of the remembered session.
pub async fn show_history(
    server_url: &str,
    data_dir: &Path,
    session_id: Option<String>,
) -> anyhow::Result<()> {
    let session_id = match session_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => match SessionFile::new(data_dir).load().await? {
            Some(id) => id,
            None => {
                println!(
                    "  {}",
                    style("No conversation yet. Start one with `supportdesk chat`.").dim()
                );
                return Ok(());
            }
        },
    };

    let client = SupportClient::new(server_url)?;
    let turns = client.history(&session_id).await?;

    println!();
    println!("  {}  {}", style("Session:").bold(), style(&session_id).dim());
    println!();
    if turns.is_empty() {
        println!("  {}", style("No messages.").dim());
    }
    for turn in &turns {
        println!("{}", format_turn(turn));
    }
    println!();

    Ok(())
}
