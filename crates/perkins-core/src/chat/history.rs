//! Conversation history with append-only semantics.
//!
//! `History` wraps the ordered message sequence and exposes only appending
//! mutators: past entries are never edited, deleted, or reordered. The one
//! structural exception is system seeding, which inserts the system prompt
//! at the head exactly once per session lifetime.

use perkins_types::llm::{Message, MessageRole};

/// The system prompt seeded at the head of every conversation.
pub const SYSTEM_PROMPT: &str = "You are Perkins, an AI coding assistant. \
    Help the user with programming tasks, explain code, suggest improvements, \
    and solve coding problems.";

/// An ordered, append-only conversation history.
#[derive(Debug, Default)]
pub struct History {
    messages: Vec<Message>,
}

impl History {
    /// Start an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap messages loaded from a session file.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Insert a system message at the head, only if none exists yet.
    ///
    /// Reloaded sessions already carry their seed, so this is a no-op for
    /// them; it never duplicates or reorders.
    pub fn seed_system(&mut self, prompt: &str) {
        let has_system = self.messages.iter().any(|m| m.role == MessageRole::System);
        if !has_system {
            self.messages.insert(0, Message::system(prompt));
        }
    }

    /// Append a user message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// The full ordered message sequence.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_system_inserts_at_head() {
        let mut history = History::from_messages(vec![
            Message::user("hi"),
            Message::assistant("hello"),
        ]);
        history.seed_system(SYSTEM_PROMPT);

        assert_eq!(history.len(), 3);
        assert_eq!(history.messages()[0].role, MessageRole::System);
        assert_eq!(history.messages()[1].content, "hi");
    }

    #[test]
    fn test_seed_system_is_idempotent() {
        let mut history = History::new();
        history.seed_system(SYSTEM_PROMPT);
        history.push_user("question");
        history.seed_system(SYSTEM_PROMPT);
        history.seed_system(SYSTEM_PROMPT);

        let system_count = history
            .messages()
            .iter()
            .filter(|m| m.role == MessageRole::System)
            .count();
        assert_eq!(system_count, 1);
        assert_eq!(history.messages()[0].role, MessageRole::System);
    }

    #[test]
    fn test_seed_respects_reloaded_seed() {
        // A reloaded session already carries its seed; no duplicate, no reorder.
        let mut history = History::from_messages(vec![
            Message::system("existing seed"),
            Message::user("hi"),
        ]);
        history.seed_system(SYSTEM_PROMPT);

        assert_eq!(history.len(), 2);
        assert_eq!(history.messages()[0].content, "existing seed");
    }

    #[test]
    fn test_appends_preserve_prefix() {
        let mut history = History::new();
        history.push_user("one");
        let before: Vec<_> = history.messages().to_vec();

        history.push_assistant("two");
        assert_eq!(&history.messages()[..before.len()], &before[..]);
        assert_eq!(history.messages().last().unwrap().content, "two");
    }

    #[test]
    fn test_empty_history() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }
}
