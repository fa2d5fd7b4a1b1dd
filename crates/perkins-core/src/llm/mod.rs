//! Provider abstraction for Perkins.
//!
//! [`provider::ChatProvider`] is the capability every vendor implements;
//! [`box_provider::BoxChatProvider`] erases the concrete type so the chat
//! loop can swap providers at runtime; [`dispatch`] holds the prefix rules
//! that map a model identifier to its vendor.

pub mod box_provider;
pub mod dispatch;
pub mod provider;
