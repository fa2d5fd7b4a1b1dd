//! Static model catalog.
//!
//! Known models per vendor, compiled into the binary. Each entry pairs the
//! human-readable display name with the vendor's wire-level identifier; the
//! wire identifier is what appears in config files and `/model` commands.

use crate::llm::dispatch::Vendor;

/// A known model: display name plus wire identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub display_name: &'static str,
    pub model_id: &'static str,
}

const OPENAI_MODELS: &[ModelInfo] = &[
    ModelInfo {
        display_name: "GPT-4 Turbo",
        model_id: "gpt-4-turbo",
    },
    ModelInfo {
        display_name: "GPT-4",
        model_id: "gpt-4",
    },
    ModelInfo {
        display_name: "GPT-3.5 Turbo",
        model_id: "gpt-3.5-turbo",
    },
];

const ANTHROPIC_MODELS: &[ModelInfo] = &[
    ModelInfo {
        display_name: "Claude 3.7 Sonnet",
        model_id: "claude-3-7-sonnet-latest",
    },
    ModelInfo {
        display_name: "Claude 3.5 Sonnet",
        model_id: "claude-3-5-sonnet-latest",
    },
    ModelInfo {
        display_name: "Claude 3 Opus",
        model_id: "claude-3-opus-latest",
    },
    ModelInfo {
        display_name: "Claude 3.5 Haiku",
        model_id: "claude-3-5-haiku-latest",
    },
];

/// Known models for a vendor, in display order.
pub fn models_for(vendor: Vendor) -> &'static [ModelInfo] {
    match vendor {
        Vendor::OpenAi => OPENAI_MODELS,
        Vendor::Anthropic => ANTHROPIC_MODELS,
    }
}

/// Look up a model by wire identifier across all vendors.
pub fn find_model(model_id: &str) -> Option<ModelInfo> {
    Vendor::ALL
        .iter()
        .flat_map(|v| models_for(*v))
        .copied()
        .find(|m| m.model_id == model_id)
}

/// Display name for a model id, falling back to the id for custom models.
pub fn display_name(model_id: &str) -> &str {
    // 'static names outlive any borrow; custom ids echo back as-is
    match find_model(model_id) {
        Some(info) => info.display_name,
        None => model_id,
    }
}
