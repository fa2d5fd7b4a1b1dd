//! Main chat loop orchestration.
//!
//! Coordinates the conversation lifecycle: config load, model selection,
//! session load with system-prompt seeding, welcome banner, input loop with
//! in-band commands, and per-turn persistence for named sessions.

use console::style;
use dialoguer::Select;
use tracing::warn;

use perkins_core::catalog;
use perkins_core::chat::history::{History, SYSTEM_PROMPT};
use perkins_core::chat::turn::run_turn;
use perkins_core::llm::box_provider::BoxChatProvider;
use perkins_infra::llm::create_provider;
use perkins_types::config::PerkinsConfig;
use perkins_types::error::ConfigError;
use perkins_types::llm::{Message, MessageRole};

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// Run the interactive chat session.
pub async fn run_chat(
    state: &AppState,
    model_flag: Option<String>,
    session_name: Option<String>,
) -> anyhow::Result<()> {
    let config = match state.config_store.load().await {
        Ok(config) => config,
        Err(err @ ConfigError::NotInitialized) => {
            println!("  {} {err}", style("!").red().bold());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    // Resolve the starting model: the flag is used verbatim, otherwise
    // prompt over the configured models with the default pre-selected.
    let mut model = match model_flag {
        Some(model) => model,
        None => match select_model(&config)? {
            Some(model) => model,
            None => return Ok(()),
        },
    };

    // Startup provider-selection failures terminate the command.
    let mut provider = match create_provider(&model, &config) {
        Ok(provider) => provider,
        Err(err) => {
            println!("  {} {err}", style("!").red().bold());
            return Ok(());
        }
    };

    let mut history = load_history(state, session_name.as_deref()).await;
    history.seed_system(SYSTEM_PROMPT);

    print_welcome_banner(catalog::display_name(&model), &model, session_name.as_deref());

    let renderer = ChatRenderer::new();
    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.read_line().await;
        match event {
            InputEvent::Eof => {
                finish_session(state, session_name.as_deref(), &history).await;
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Type \"exit\" or press Ctrl+D to end the session.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Exit => {
                            finish_session(state, session_name.as_deref(), &history).await;
                            break;
                        }
                        ChatCommand::Help => {
                            commands::print_help();
                            continue;
                        }
                        ChatCommand::SwitchModel(name) => {
                            switch_model(&config, &name, &mut model, &mut provider);
                            continue;
                        }
                    }
                }

                // Chat message: one turn against the active provider
                let spinner = indicatif::ProgressBar::new_spinner();
                spinner.set_style(
                    indicatif::ProgressStyle::default_spinner()
                        .template("{spinner:.cyan} {msg}")
                        .unwrap(),
                );
                spinner.set_message("Perkins is thinking...");
                spinner.enable_steady_tick(std::time::Duration::from_millis(80));

                match run_turn(&provider, &mut history, &text).await {
                    Ok(reply) => {
                        spinner.finish_and_clear();
                        println!("\n  {}", style("Perkins:").cyan().bold());
                        println!("{}", renderer.render(&reply));
                        println!();

                        // Persist only after a fully successful turn
                        if let Some(name) = &session_name {
                            if let Err(err) = state.session_store.save(name, history.messages()).await {
                                warn!(error = %err, session = %name, "failed to save session");
                                println!(
                                    "  {} Could not save session: {err}",
                                    style("!").yellow().bold()
                                );
                            }
                        }
                    }
                    Err(err) => {
                        spinner.finish_and_clear();
                        eprintln!("\n  {} Error getting response: {err}", style("!").red().bold());
                        eprintln!(
                            "  {}",
                            style("The conversation is intact; try again or switch models with /model.")
                                .dim()
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

/// Prompt for a model across all configured providers.
///
/// Returns `None` when the config has no models to offer.
fn select_model(config: &PerkinsConfig) -> anyhow::Result<Option<String>> {
    let models: Vec<String> = config
        .configured_models()
        .iter()
        .map(|m| m.to_string())
        .collect();

    if models.is_empty() {
        println!(
            "  {} No models configured. Run {} first.",
            style("!").yellow().bold(),
            style("perkins init").yellow()
        );
        return Ok(None);
    }

    let items: Vec<String> = models
        .iter()
        .map(|id| format!("{} ({id})", catalog::display_name(id)))
        .collect();
    let default_index = models
        .iter()
        .position(|m| *m == config.default_model)
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Select a model")
        .items(&items)
        .default(default_index)
        .interact()?;

    Ok(Some(models[selection].clone()))
}

/// Load the named session's history, or start empty.
///
/// A malformed session file is discarded with a warning rather than
/// failing the command.
async fn load_history(state: &AppState, session_name: Option<&str>) -> History {
    let Some(name) = session_name else {
        return History::new();
    };

    match state.session_store.load(name).await {
        Ok(messages) => {
            if !messages.is_empty() {
                println!(
                    "  {} Loaded session \"{name}\" with {} messages",
                    style("\u{2713}").green().bold(),
                    messages.len()
                );
                print_session_preview(&messages);
            }
            History::from_messages(messages)
        }
        Err(err) => {
            println!(
                "  {} Error loading session, starting fresh: {err}",
                style("!").yellow().bold()
            );
            History::new()
        }
    }
}

/// Show the last few messages of a resumed session for context.
fn print_session_preview(messages: &[Message]) {
    let recent: Vec<&Message> = messages
        .iter()
        .filter(|m| m.role != MessageRole::System)
        .collect();
    let start = recent.len().saturating_sub(4);
    if recent[start..].is_empty() {
        return;
    }

    println!("\n  {}", style("=== Previous messages ===").dim());
    for msg in &recent[start..] {
        let prefix = match msg.role {
            MessageRole::User => style("You: ").green().bold(),
            _ => style("Perkins: ").cyan().bold(),
        };
        let preview: String = if msg.content.chars().count() > 100 {
            let truncated: String = msg.content.chars().take(100).collect();
            format!("{truncated}...")
        } else {
            msg.content.clone()
        };
        println!("  {prefix}{preview}");
    }
    println!("  {}\n", style("=== End of previous messages ===").dim());
}

/// Handle `/model <name>`: validate against the configured models, then
/// swap the active provider. History is untouched either way.
fn switch_model(
    config: &PerkinsConfig,
    name: &str,
    model: &mut String,
    provider: &mut BoxChatProvider,
) {
    if !config.has_model(name) {
        println!(
            "\n  {} Unknown model: {}",
            style("!").yellow().bold(),
            style(if name.is_empty() { "(none given)" } else { name }).bold()
        );
        println!(
            "  Available models: {}\n",
            config.configured_models().join(", ")
        );
        return;
    }

    match create_provider(name, config) {
        Ok(new_provider) => {
            println!(
                "\n  {} Switched to {} {} [{}]\n",
                style("\u{2713}").green().bold(),
                catalog::display_name(name),
                style(format!("({name})")).dim(),
                new_provider.name()
            );
            *provider = new_provider;
            *model = name.to_string();
        }
        Err(err) => {
            println!("\n  {} {err}\n", style("!").yellow().bold());
        }
    }
}

/// Persist the session (when named) and say goodbye.
async fn finish_session(state: &AppState, session_name: Option<&str>, history: &History) {
    println!("\n  {}", style("Ending chat session. Goodbye!").cyan());

    if let Some(name) = session_name {
        match state.session_store.save(name, history.messages()).await {
            Ok(()) => println!("  {}", style(format!("Session saved as \"{name}\"")).dim()),
            Err(err) => {
                warn!(error = %err, session = %name, "failed to save session at exit");
                println!(
                    "  {} Could not save session: {err}",
                    style("!").yellow().bold()
                );
            }
        }
    }
}
