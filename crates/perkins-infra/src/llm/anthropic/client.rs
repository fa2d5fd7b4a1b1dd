//! AnthropicProvider -- concrete [`ChatProvider`] implementation for
//! Anthropic Claude.
//!
//! Sends the conversation to the Anthropic Messages API (`/v1/messages`)
//! with proper authentication headers. The API key is wrapped in
//! [`secrecy::SecretString`] and is never logged.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use perkins_core::llm::provider::ChatProvider;
use perkins_types::llm::{LlmError, Message, MessageRole};

use super::types::{AnthropicContentBlock, AnthropicMessage, AnthropicRequest, AnthropicResponse};

/// Anthropic Claude chat provider.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing HTTP request headers. It never appears in Display output
/// or tracing logs.
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl AnthropicProvider {
    /// The Anthropic API version header value.
    const API_VERSION: &'static str = "2023-06-01";

    /// Output cap sent with every request; the Messages API requires one.
    const MAX_TOKENS: u32 = 4000;

    /// Create a new Anthropic provider bound to a model.
    pub fn new(api_key: SecretString, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://api.anthropic.com".to_string(),
            model,
        }
    }

    /// The model this provider is bound to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Translate the generic history into an [`AnthropicRequest`].
    ///
    /// The first system message moves to the request's top-level `system`
    /// field; user/assistant messages pass through in conversation order.
    fn to_anthropic_request(&self, history: &[Message]) -> AnthropicRequest {
        let system = history
            .iter()
            .find(|m| m.role == MessageRole::System)
            .map(|m| m.content.clone());

        let messages = history
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .map(|m| AnthropicMessage {
                role: m.role.to_string(),
                content: m.content.clone(),
            })
            .collect();

        AnthropicRequest {
            model: self.model.clone(),
            max_tokens: Self::MAX_TOKENS,
            messages,
            system,
        }
    }
}

// AnthropicProvider intentionally does NOT derive Debug to prevent
// accidental exposure of internal state alongside the SecretString key.

impl ChatProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "Anthropic"
    }

    async fn generate_response(&self, history: &[Message]) -> Result<String, LlmError> {
        let body = self.to_anthropic_request(history);
        let url = self.url("/v1/messages");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited {
                    retry_after_ms: None,
                },
                529 => LlmError::Overloaded(error_body),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let anthropic_resp: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let text = anthropic_resp
            .content
            .iter()
            .filter_map(|block| match block {
                AnthropicContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("");

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider() -> AnthropicProvider {
        AnthropicProvider::new(
            SecretString::from("test-key-not-real"),
            "claude-3-opus-latest".to_string(),
        )
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(make_provider().name(), "Anthropic");
        assert_eq!(make_provider().model(), "claude-3-opus-latest");
    }

    #[test]
    fn test_system_message_moves_out_of_band() {
        let provider = make_provider();
        let history = vec![
            Message::system("You are Perkins."),
            Message::user("hi"),
            Message::assistant("hello"),
            Message::user("how are you?"),
        ];

        let req = provider.to_anthropic_request(&history);
        assert_eq!(req.system.as_deref(), Some("You are Perkins."));
        assert_eq!(req.messages.len(), 3);
        assert_eq!(req.messages[0].role, "user");
        assert_eq!(req.messages[1].role, "assistant");
        assert_eq!(req.messages[2].content, "how are you?");
        assert_eq!(req.max_tokens, 4000);
    }

    #[test]
    fn test_request_without_system_message() {
        let provider = make_provider();
        let history = vec![Message::user("hi")];
        let req = provider.to_anthropic_request(&history);
        assert!(req.system.is_none());
        assert_eq!(req.messages.len(), 1);
    }

    #[test]
    fn test_translation_preserves_order_and_content() {
        let provider = make_provider();
        let turns: Vec<Message> = (0..5)
            .flat_map(|i| {
                vec![
                    Message::user(format!("q{i}")),
                    Message::assistant(format!("a{i}")),
                ]
            })
            .collect();

        let req = provider.to_anthropic_request(&turns);
        assert_eq!(req.messages.len(), 10);
        for (i, pair) in req.messages.chunks(2).enumerate() {
            assert_eq!(pair[0].content, format!("q{i}"));
            assert_eq!(pair[1].content, format!("a{i}"));
        }
    }

    #[test]
    fn test_base_url_override() {
        let provider = make_provider().with_base_url("http://localhost:8080".to_string());
        assert_eq!(
            provider.url("/v1/messages"),
            "http://localhost:8080/v1/messages"
        );
    }
}
