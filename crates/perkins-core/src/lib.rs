//! Core logic for Perkins: the provider abstraction, vendor dispatch rules,
//! the static model catalog, and conversation-history management.
//!
//! This crate performs no I/O. Concrete provider implementations and the
//! config/session stores live in `perkins-infra`.

pub mod catalog;
pub mod chat;
pub mod llm;
