//! ChatProvider trait definition.
//!
//! This is the core abstraction every LLM vendor implements. Uses RPITIT
//! (native async fn in traits, Rust 2024 edition); `BoxChatProvider` adds
//! object safety on top for runtime provider swapping.

use perkins_types::llm::{LlmError, Message};

/// Trait for chat-completion backends (OpenAI, Anthropic).
///
/// A provider is bound to one model identifier at construction time. Each
/// implementation performs whatever message-shape translation its vendor
/// requires (e.g. passing the system message out-of-band), decided once at
/// construction and applied uniformly on every call. Translation must be
/// lossless for user/assistant content: no truncation, no reordering.
///
/// Implementations live in perkins-infra.
pub trait ChatProvider: Send + Sync {
    /// Human-readable provider name for display (e.g., "OpenAI").
    fn name(&self) -> &str;

    /// Send the full conversation history and receive the reply text.
    ///
    /// This is the only suspending operation in the system: it performs a
    /// network call to the vendor endpoint. Failures propagate to the
    /// caller untouched.
    fn generate_response(
        &self,
        history: &[Message],
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
