//! One conversation turn: user input in, assistant reply out.

use tracing::debug;

use perkins_types::llm::LlmError;

use crate::llm::box_provider::BoxChatProvider;

use super::history::History;

/// Run one turn against the active provider.
///
/// Appends the user message, sends the entire history to the provider, and
/// appends the reply. On failure the user message stays appended (input is
/// never silently lost) but no assistant message is written; persisting the
/// result is the caller's job and happens only after success.
pub async fn run_turn(
    provider: &BoxChatProvider,
    history: &mut History,
    input: &str,
) -> Result<String, LlmError> {
    history.push_user(input);
    debug!(provider = provider.name(), messages = history.len(), "sending turn");

    let reply = provider.generate_response(history.messages()).await?;
    history.push_assistant(reply.clone());
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::history::SYSTEM_PROMPT;
    use crate::llm::provider::ChatProvider;
    use perkins_types::llm::{Message, MessageRole};

    struct FixedProvider {
        reply: String,
    }

    impl ChatProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn generate_response(&self, _history: &[Message]) -> Result<String, LlmError> {
            Ok(self.reply.clone())
        }
    }

    struct FailingProvider;

    impl ChatProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate_response(&self, _history: &[Message]) -> Result<String, LlmError> {
            Err(LlmError::Provider {
                message: "HTTP 500: internal error".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_successful_turn_appends_two_messages() {
        let provider = BoxChatProvider::new(FixedProvider {
            reply: "the answer".to_string(),
        });
        let mut history = History::new();
        history.seed_system(SYSTEM_PROMPT);
        let before = history.len();

        let reply = run_turn(&provider, &mut history, "question").await.unwrap();

        assert_eq!(reply, "the answer");
        assert_eq!(history.len(), before + 2);
        let messages = history.messages();
        assert_eq!(messages[before].role, MessageRole::User);
        assert_eq!(messages[before].content, "question");
        assert_eq!(messages[before + 1].role, MessageRole::Assistant);
        assert_eq!(messages[before + 1].content, "the answer");
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_user_message_only() {
        let provider = BoxChatProvider::new(FailingProvider);
        let mut history = History::new();
        history.seed_system(SYSTEM_PROMPT);
        let before: Vec<_> = history.messages().to_vec();

        let err = run_turn(&provider, &mut history, "question")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Provider { .. }));

        // User message retained, no assistant message, prefix untouched.
        assert_eq!(history.len(), before.len() + 1);
        assert_eq!(&history.messages()[..before.len()], &before[..]);
        let last = history.messages().last().unwrap();
        assert_eq!(last.role, MessageRole::User);
        assert_eq!(last.content, "question");
    }

    #[tokio::test]
    async fn test_turn_sends_full_history() {
        struct CountingProvider;

        impl ChatProvider for CountingProvider {
            fn name(&self) -> &str {
                "counting"
            }

            async fn generate_response(&self, history: &[Message]) -> Result<String, LlmError> {
                Ok(format!("saw {} messages", history.len()))
            }
        }

        let provider = BoxChatProvider::new(CountingProvider);
        let mut history = History::new();
        history.seed_system(SYSTEM_PROMPT);

        let reply = run_turn(&provider, &mut history, "first").await.unwrap();
        // system + user
        assert_eq!(reply, "saw 2 messages");

        let reply = run_turn(&provider, &mut history, "second").await.unwrap();
        // system + user + assistant + user
        assert_eq!(reply, "saw 4 messages");
    }
}
