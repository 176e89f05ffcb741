//! Welcome banner and turn formatting for the terminal widget.

use chrono::Local;
use console::style;

use supportdesk_types::chat::{Sender, Turn};

/// Shown when there is no earlier conversation to restore.
pub const GREETING: &str = "Hi there! How can I help you today?";

/// Shown in place of a reply when the server cannot be reached.
pub const TRANSPORT_ERROR_REPLY: &str = "Sorry, something went wrong. Please try again.";

/// Print the welcome banner at the start of a chat.
pub fn print_welcome_banner(server_url: &str, session_id: Option<&str>) {
    println!();
    println!("  {}", style("Support Agent").cyan().bold());
    println!("  {}", style(format!("Connected to {server_url}")).dim());
    if let Some(id) = session_id {
        let short: String = id.chars().take(8).collect();
        println!("  {}  {}", style("Session:").bold(), style(short).dim());
    }
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// Label and text of one agent line.
pub fn format_agent(text: &str) -> String {
    format!("  {} {}", style("Agent >").cyan().bold(), text.trim())
}

/// One stored turn, with its local time.
pub fn format_turn(turn: &Turn) -> String {
    let time = turn.timestamp.with_timezone(&Local).format("%H:%M");
    let label = match turn.sender {
        Sender::User => style("You   >").green().bold(),
        Sender::Agent => style("Agent >").cyan().bold(),
    };
    format!("  {} {} {}", style(time).dim(), label, turn.text.trim())
}
