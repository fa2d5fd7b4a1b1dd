//! LLM provider implementations.
//!
//! Contains concrete implementations of the [`ChatProvider`] trait defined
//! in `perkins-core`, plus the provider factory ([`create_provider`]) that
//! selects and constructs the right provider for a model identifier.
//!
//! [`ChatProvider`]: perkins_core::llm::provider::ChatProvider

pub mod anthropic;
pub mod openai;

use secrecy::SecretString;

use perkins_core::llm::box_provider::BoxChatProvider;
use perkins_core::llm::dispatch::{Vendor, vendor_for_model};
use perkins_types::config::PerkinsConfig;
use perkins_types::error::ProviderSelectError;

use self::anthropic::AnthropicProvider;
use self::openai::OpenAiProvider;

/// Create a [`BoxChatProvider`] for a model identifier.
///
/// The vendor is resolved through the core prefix rules, then the matching
/// provider section of the configuration supplies the API key. A model with
/// no matching rule is `UnsupportedModel`; a matching rule without a stored
/// configuration is `MissingProviderConfig`, naming the vendor.
pub fn create_provider(
    model_id: &str,
    config: &PerkinsConfig,
) -> Result<BoxChatProvider, ProviderSelectError> {
    match vendor_for_model(model_id) {
        Some(vendor @ Vendor::OpenAi) => {
            let provider_config = config.providers.openai.as_ref().ok_or_else(|| {
                ProviderSelectError::MissingProviderConfig(vendor.display_name().to_string())
            })?;
            let provider = OpenAiProvider::new(&provider_config.api_key, model_id);
            Ok(BoxChatProvider::new(provider))
        }
        Some(vendor @ Vendor::Anthropic) => {
            let provider_config = config.providers.anthropic.as_ref().ok_or_else(|| {
                ProviderSelectError::MissingProviderConfig(vendor.display_name().to_string())
            })?;
            let api_key = SecretString::from(provider_config.api_key.clone());
            let provider = AnthropicProvider::new(api_key, model_id.to_string());
            Ok(BoxChatProvider::new(provider))
        }
        None => Err(ProviderSelectError::UnsupportedModel(model_id.to_string())),
    }
}
