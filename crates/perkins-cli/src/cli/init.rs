//! Interactive initialization workflow.
//!
//! Walks the user through provider selection, API keys, and model
//! enablement, then writes `config.json`. This and the `models` command
//! are the only writers of the configuration.

use chrono::Utc;
use console::style;
use dialoguer::{Confirm, MultiSelect, Password, Select};

use perkins_core::catalog;
use perkins_core::llm::dispatch::Vendor;
use perkins_types::config::{PerkinsConfig, ProviderConfig, ProviderSet};
use perkins_types::error::ConfigError;

use crate::state::AppState;

/// Run `perkins init`.
pub async fn run(state: &AppState) -> anyhow::Result<()> {
    println!();
    println!(
        "  {}",
        style("Initializing Perkins AI coding assistant...").cyan().bold()
    );

    let existing = match state.config_store.load().await {
        Ok(config) => Some(config),
        Err(ConfigError::NotInitialized) => None,
        Err(err) => {
            println!(
                "  {} Error reading existing config ({err}). Creating a new one.",
                style("!").yellow().bold()
            );
            None
        }
    };

    if existing.is_some() {
        let reinitialize = Confirm::new()
            .with_prompt("Perkins is already initialized. Do you want to reinitialize?")
            .default(false)
            .interact()?;
        if !reinitialize {
            println!("  {}", style("Initialization canceled.").green());
            return Ok(());
        }
    }

    let provider_labels = ["OpenAI (GPT models)", "Anthropic (Claude models)"];
    let selected = loop {
        let selected = MultiSelect::new()
            .with_prompt("Select AI providers to configure")
            .items(&provider_labels)
            .interact()?;
        if !selected.is_empty() {
            break selected;
        }
        println!(
            "  {}",
            style("Please select at least one provider.").yellow()
        );
    };

    let mut providers = ProviderSet::default();
    for index in selected {
        let vendor = Vendor::ALL[index];
        println!(
            "\n  {}",
            style(format!("Configuring {}...", vendor.display_name())).cyan()
        );

        let api_key: String = Password::new()
            .with_prompt(format!("Enter your {} API key", vendor.display_name()))
            .interact()?;

        let known = catalog::models_for(vendor);
        let items: Vec<&str> = known.iter().map(|m| m.display_name).collect();
        let defaults = vec![true; items.len()];
        let picked = loop {
            let picked = MultiSelect::new()
                .with_prompt(format!(
                    "Select which {} models you want to use",
                    vendor.display_name()
                ))
                .items(&items)
                .defaults(&defaults)
                .interact()?;
            if !picked.is_empty() {
                break picked;
            }
            println!("  {}", style("Please select at least one model.").yellow());
        };

        let models: Vec<String> = picked
            .into_iter()
            .map(|i| known[i].model_id.to_string())
            .collect();
        let provider_config = ProviderConfig { api_key, models };

        match vendor {
            Vendor::OpenAi => providers.openai = Some(provider_config),
            Vendor::Anthropic => providers.anthropic = Some(provider_config),
        }
    }

    let mut config = PerkinsConfig {
        providers,
        default_model: String::new(),
        timestamp: Utc::now(),
    };

    // Default model across the union of enabled models; keep the previous
    // default when it is still enabled.
    let all_models: Vec<String> = config
        .configured_models()
        .iter()
        .map(|m| m.to_string())
        .collect();
    let default_index = existing
        .as_ref()
        .and_then(|c| all_models.iter().position(|m| *m == c.default_model))
        .unwrap_or(0);
    let items: Vec<String> = all_models
        .iter()
        .map(|id| format!("{} ({id})", catalog::display_name(id)))
        .collect();

    let chosen = Select::new()
        .with_prompt("Select default model")
        .items(&items)
        .default(default_index)
        .interact()?;
    config.default_model = all_models[chosen].clone();

    state.config_store.save(&config).await?;

    println!(
        "\n  {} Perkins initialized successfully!",
        style("\u{2713}").green().bold()
    );
    println!(
        "  {}",
        style(format!(
            "Configuration saved to {}",
            state.config_store.path().display()
        ))
        .dim()
    );
    println!(
        "  {}",
        style(format!("Default model set to: {}", config.default_model)).cyan()
    );

    Ok(())
}
