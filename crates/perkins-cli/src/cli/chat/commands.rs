//! In-band command parsing for the chat loop.
//!
//! `exit` ends the session; slash commands provide in-chat controls. Any
//! other non-empty input, including unrecognized `/words`, is a chat
//! message and goes to the model.

use console::style;

/// Commands recognized at the chat prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum ChatCommand {
    /// End the chat session.
    Exit,
    /// Switch the active model, keeping history.
    SwitchModel(String),
    /// Show available commands.
    Help,
}

/// Parse user input as an in-band command.
///
/// Returns `None` when the input is an ordinary chat message.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();

    // "exit" is an exact token, case-insensitive
    if trimmed.eq_ignore_ascii_case("exit") {
        return Some(ChatCommand::Exit);
    }

    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or_default();

    match cmd.as_str() {
        "/exit" | "/quit" => Some(ChatCommand::Exit),
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/model" => Some(ChatCommand::SwitchModel(arg.to_string())),
        _ => None,
    }
}

/// Print the help text listing the in-band commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!(
        "  {}        {}",
        style("exit").cyan(),
        "End the chat session (also /exit, /quit, Ctrl+D)"
    );
    println!(
        "  {} {}",
        style("/model <id>").cyan(),
        "Switch the active model, keeping the conversation"
    );
    println!(
        "  {}       {}",
        style("/help").cyan(),
        "Show this help message"
    );
    println!();
}
