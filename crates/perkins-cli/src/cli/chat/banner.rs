//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
///
/// Shows the model (display name plus wire id), where the conversation is
/// being persisted, and a hint about in-band commands.
pub fn print_welcome_banner(model_display: &str, model_id: &str, session: Option<&str>) {
    println!();
    println!("  {}", style("Perkins").cyan().bold());
    println!("  {}", style("AI coding assistant").dim());
    println!();
    println!(
        "  {}  {} {}",
        style("Model:").bold(),
        model_display,
        style(format!("({model_id})")).dim()
    );
    match session {
        Some(name) => println!("  {}  {}", style("Session:").bold(), name),
        None => println!(
            "  {}  {}",
            style("Session:").bold(),
            style("ephemeral (not saved)").dim()
        ),
    }
    println!();
    println!(
        "  {}",
        style("Type \"exit\" to end, /model <id> to switch models, /help for more").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
