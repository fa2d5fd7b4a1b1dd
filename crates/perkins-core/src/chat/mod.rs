//! Conversation-history management and turn orchestration.

pub mod history;
pub mod turn;
