//! BoxChatProvider -- object-safe dynamic dispatch wrapper for ChatProvider.
//!
//! 1. Define an object-safe `ChatProviderDyn` trait with a boxed future
//! 2. Blanket-impl `ChatProviderDyn` for all `T: ChatProvider`
//! 3. `BoxChatProvider` wraps `Box<dyn ChatProviderDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use perkins_types::llm::{LlmError, Message};

use super::provider::ChatProvider;

/// Object-safe version of [`ChatProvider`] with a boxed future.
///
/// This trait exists solely to enable dynamic dispatch; a blanket
/// implementation is provided for all types implementing `ChatProvider`.
pub trait ChatProviderDyn: Send + Sync {
    fn name(&self) -> &str;

    fn generate_response_boxed<'a>(
        &'a self,
        history: &'a [Message],
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>>;
}

/// Blanket implementation: any `ChatProvider` automatically implements `ChatProviderDyn`.
impl<T: ChatProvider> ChatProviderDyn for T {
    fn name(&self) -> &str {
        ChatProvider::name(self)
    }

    fn generate_response_boxed<'a>(
        &'a self,
        history: &'a [Message],
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>> {
        Box::pin(self.generate_response(history))
    }
}

/// Type-erased chat provider for runtime provider selection.
///
/// Since `ChatProvider` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxChatProvider` provides equivalent methods that delegate to
/// the inner `ChatProviderDyn` trait object, letting the chat loop replace
/// the active provider mid-session (`/model`).
pub struct BoxChatProvider {
    inner: Box<dyn ChatProviderDyn + Send + Sync>,
}

impl std::fmt::Debug for BoxChatProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxChatProvider")
            .field("name", &self.inner.name())
            .finish()
    }
}

impl BoxChatProvider {
    /// Wrap a concrete `ChatProvider` in a type-erased box.
    pub fn new<T: ChatProvider + 'static>(provider: T) -> Self {
        Self {
            inner: Box::new(provider),
        }
    }

    /// Human-readable provider name for display.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Send the full conversation history and receive the reply text.
    pub async fn generate_response(&self, history: &[Message]) -> Result<String, LlmError> {
        self.inner.generate_response_boxed(history).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProvider;

    impl ChatProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate_response(&self, history: &[Message]) -> Result<String, LlmError> {
            Ok(history.last().map(|m| m.content.clone()).unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn test_box_provider_delegates() {
        let provider = BoxChatProvider::new(EchoProvider);
        assert_eq!(provider.name(), "echo");

        let history = vec![Message::user("ping")];
        let reply = provider.generate_response(&history).await.unwrap();
        assert_eq!(reply, "ping");
    }
}
