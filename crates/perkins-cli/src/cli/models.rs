//! Model management: list, add, delete, set default.
//!
//! Operates on the same `config.json` that `init` writes. The chat loop
//! never mutates configuration; all changes go through here.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::{Input, Select};

use perkins_core::catalog;
use perkins_core::llm::dispatch::Vendor;
use perkins_types::config::{PerkinsConfig, ProviderConfig};
use perkins_types::error::ConfigError;

use crate::state::AppState;

/// Run `perkins models` with the given action flags; no flag lists.
pub async fn run(state: &AppState, add: bool, delete: bool, set_default: bool) -> anyhow::Result<()> {
    let mut config = match state.config_store.load().await {
        Ok(config) => config,
        Err(err @ ConfigError::NotInitialized) => {
            println!("  {} {err}", style("!").red().bold());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if add {
        add_model(state, &mut config).await
    } else if delete {
        delete_model(state, &mut config).await
    } else if set_default {
        set_default_model(state, &mut config).await
    } else {
        list_models(&config);
        Ok(())
    }
}

/// One configured model, flattened across providers for display.
#[derive(Debug, PartialEq, Eq)]
struct ConfiguredModel {
    vendor: Vendor,
    model_id: String,
    is_default: bool,
}

impl ConfiguredModel {
    fn label(&self) -> String {
        format!(
            "{} ({}){} [{}]",
            catalog::display_name(&self.model_id),
            self.model_id,
            if self.is_default { " (default)" } else { "" },
            self.vendor.display_name()
        )
    }
}

/// Flatten the configured models in display order.
fn configured_models(config: &PerkinsConfig) -> Vec<ConfiguredModel> {
    let mut models = Vec::new();
    for vendor in Vendor::ALL {
        let Some(provider_config) = provider_config(config, *vendor) else {
            continue;
        };
        for model_id in &provider_config.models {
            models.push(ConfiguredModel {
                vendor: *vendor,
                model_id: model_id.clone(),
                is_default: *model_id == config.default_model,
            });
        }
    }
    models
}

fn provider_config(config: &PerkinsConfig, vendor: Vendor) -> Option<&ProviderConfig> {
    match vendor {
        Vendor::OpenAi => config.providers.openai.as_ref(),
        Vendor::Anthropic => config.providers.anthropic.as_ref(),
    }
}

fn provider_config_mut(config: &mut PerkinsConfig, vendor: Vendor) -> Option<&mut ProviderConfig> {
    match vendor {
        Vendor::OpenAi => config.providers.openai.as_mut(),
        Vendor::Anthropic => config.providers.anthropic.as_mut(),
    }
}

/// Print all configured models grouped into a table.
fn list_models(config: &PerkinsConfig) {
    let models = configured_models(config);
    if models.is_empty() {
        println!("  {}", style("No models configured.").yellow());
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Model").fg(Color::White),
        Cell::new("Wire ID").fg(Color::White),
        Cell::new("Provider").fg(Color::White),
        Cell::new("Default").fg(Color::White),
    ]);

    for model in &models {
        table.add_row(vec![
            Cell::new(catalog::display_name(&model.model_id)).fg(Color::Cyan),
            Cell::new(&model.model_id),
            Cell::new(model.vendor.display_name()),
            Cell::new(if model.is_default { "\u{2713}" } else { "" }).fg(Color::Green),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} model{}",
        style(models.len()).bold(),
        if models.len() == 1 { "" } else { "s" }
    );
    println!();
}

/// Add a model to a configured provider, from the catalog or a custom id.
async fn add_model(state: &AppState, config: &mut PerkinsConfig) -> anyhow::Result<()> {
    let vendors: Vec<Vendor> = Vendor::ALL
        .iter()
        .copied()
        .filter(|v| provider_config(config, *v).is_some())
        .collect();

    if vendors.is_empty() {
        println!(
            "  {} No providers configured. Run {} first.",
            style("!").red().bold(),
            style("perkins init").yellow()
        );
        return Ok(());
    }

    let vendor = if vendors.len() == 1 {
        vendors[0]
    } else {
        let items: Vec<&str> = vendors.iter().map(|v| v.display_name()).collect();
        let selection = Select::new()
            .with_prompt("Select provider to add model for")
            .items(&items)
            .interact()?;
        vendors[selection]
    };

    let existing = &provider_config(config, vendor).unwrap().models;
    let available: Vec<_> = catalog::models_for(vendor)
        .iter()
        .filter(|m| !existing.iter().any(|e| e == m.model_id))
        .collect();

    const CUSTOM: &str = "-- Enter custom model id --";
    let mut items: Vec<String> = available
        .iter()
        .map(|m| format!("{} ({})", m.display_name, m.model_id))
        .collect();
    items.push(CUSTOM.to_string());

    let selection = Select::new()
        .with_prompt("Select model to add")
        .items(&items)
        .interact()?;

    let model_id = if selection == available.len() {
        Input::<String>::new()
            .with_prompt("Enter custom model id")
            .validate_with(|input: &String| {
                if input.trim().is_empty() {
                    Err("Model id is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()?
            .trim()
            .to_string()
    } else {
        available[selection].model_id.to_string()
    };

    if existing.iter().any(|e| *e == model_id) {
        println!(
            "  {} Model {} is already configured.",
            style("!").yellow().bold(),
            style(&model_id).bold()
        );
        return Ok(());
    }

    provider_config_mut(config, vendor)
        .unwrap()
        .models
        .push(model_id.clone());
    state.config_store.save(config).await?;

    println!(
        "  {} Added model: {}",
        style("\u{2713}").green().bold(),
        style(&model_id).bold()
    );
    Ok(())
}

/// Delete a configured model. The default model cannot be deleted.
async fn delete_model(state: &AppState, config: &mut PerkinsConfig) -> anyhow::Result<()> {
    let models = configured_models(config);
    if models.is_empty() {
        println!("  {}", style("No models configured.").yellow());
        return Ok(());
    }

    let items: Vec<String> = models.iter().map(ConfiguredModel::label).collect();
    let selection = Select::new()
        .with_prompt("Select model to delete")
        .items(&items)
        .interact()?;
    let target = &models[selection];

    if target.is_default {
        println!(
            "  {} Cannot delete the default model. Set a new default first.",
            style("!").red().bold()
        );
        return Ok(());
    }

    let provider_models = &mut provider_config_mut(config, target.vendor).unwrap().models;
    provider_models.retain(|m| *m != target.model_id);
    state.config_store.save(config).await?;

    println!(
        "  {} Deleted model: {}",
        style("\u{2713}").green().bold(),
        style(&target.model_id).bold()
    );
    Ok(())
}

/// Pick a new default model among the configured ones.
async fn set_default_model(state: &AppState, config: &mut PerkinsConfig) -> anyhow::Result<()> {
    let models = configured_models(config);
    if models.is_empty() {
        println!("  {}", style("No models configured.").yellow());
        return Ok(());
    }

    let items: Vec<String> = models.iter().map(ConfiguredModel::label).collect();
    let current = models.iter().position(|m| m.is_default).unwrap_or(0);
    let selection = Select::new()
        .with_prompt("Select new default model")
        .items(&items)
        .default(current)
        .interact()?;

    config.default_model = models[selection].model_id.clone();
    state.config_store.save(config).await?;

    println!(
        "  {} Default model set to: {}",
        style("\u{2713}").green().bold(),
        style(&config.default_model).bold()
    );
    Ok(())
}
