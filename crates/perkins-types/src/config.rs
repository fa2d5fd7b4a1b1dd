//! Configuration types for Perkins.
//!
//! `PerkinsConfig` models the single `config.json` written by `perkins init`
//! and read by every other command. Field names are camelCase on disk
//! (`apiKey`, `defaultModel`), matching the established file format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-provider configuration: the API key and the models the user enabled.
///
/// Model order is insertion order and is preserved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub api_key: String,
    pub models: Vec<String>,
}

/// The set of configured providers. Each is optional: `init` only writes
/// sections for the providers the user selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai: Option<ProviderConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anthropic: Option<ProviderConfig>,
}

/// Top-level Perkins configuration.
///
/// Singleton, stored at `{data_dir}/config.json`. Written by the
/// `init`/`models` workflows; the chat loop only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerkinsConfig {
    pub providers: ProviderSet,
    pub default_model: String,
    pub timestamp: DateTime<Utc>,
}

impl PerkinsConfig {
    /// All enabled model ids across all configured providers, in display
    /// order: OpenAI first, then Anthropic, each in insertion order.
    pub fn configured_models(&self) -> Vec<&str> {
        let mut models = Vec::new();
        if let Some(openai) = &self.providers.openai {
            models.extend(openai.models.iter().map(String::as_str));
        }
        if let Some(anthropic) = &self.providers.anthropic {
            models.extend(anthropic.models.iter().map(String::as_str));
        }
        models
    }

    /// Whether `model_id` is enabled under some configured provider.
    pub fn has_model(&self, model_id: &str) -> bool {
        self.configured_models().iter().any(|m| *m == model_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> PerkinsConfig {
        PerkinsConfig {
            providers: ProviderSet {
                openai: Some(ProviderConfig {
                    api_key: "sk-test".to_string(),
                    models: vec!["gpt-4-turbo".to_string(), "gpt-4".to_string()],
                }),
                anthropic: Some(ProviderConfig {
                    api_key: "sk-ant-test".to_string(),
                    models: vec!["claude-3-opus-latest".to_string()],
                }),
            },
            default_model: "gpt-4".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_config_camel_case_keys() {
        let json = serde_json::to_value(sample_config()).unwrap();
        assert!(json.get("defaultModel").is_some());
        assert!(json["providers"]["openai"].get("apiKey").is_some());
        // snake_case must not leak into the file format
        assert!(json.get("default_model").is_none());
    }

    #[test]
    fn test_config_parses_stored_file_format() {
        let json = r#"{
            "providers": {
                "anthropic": {
                    "apiKey": "sk-ant-abc",
                    "models": ["claude-3-5-sonnet-latest", "claude-3-opus-latest"]
                }
            },
            "defaultModel": "claude-3-5-sonnet-latest",
            "timestamp": "2025-04-20T12:00:00.000Z"
        }"#;
        let config: PerkinsConfig = serde_json::from_str(json).unwrap();
        assert!(config.providers.openai.is_none());
        let anthropic = config.providers.anthropic.unwrap();
        assert_eq!(anthropic.api_key, "sk-ant-abc");
        assert_eq!(anthropic.models.len(), 2);
        assert_eq!(config.default_model, "claude-3-5-sonnet-latest");
    }

    #[test]
    fn test_absent_provider_not_serialized() {
        let mut config = sample_config();
        config.providers.openai = None;
        let json = serde_json::to_value(&config).unwrap();
        assert!(json["providers"].get("openai").is_none());
        assert!(json["providers"].get("anthropic").is_some());
    }

    #[test]
    fn test_configured_models_order() {
        let config = sample_config();
        assert_eq!(
            config.configured_models(),
            vec!["gpt-4-turbo", "gpt-4", "claude-3-opus-latest"]
        );
    }

    #[test]
    fn test_has_model() {
        let config = sample_config();
        assert!(config.has_model("gpt-4"));
        assert!(config.has_model("claude-3-opus-latest"));
        assert!(!config.has_model("mistral-large"));
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = sample_config();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: PerkinsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.default_model, config.default_model);
        assert_eq!(parsed.providers, config.providers);
    }
}
