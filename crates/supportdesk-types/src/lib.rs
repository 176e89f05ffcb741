//! Shared domain types for supportdesk.
//!
//! This crate contains the core domain types used across the workspace:
//! chat sessions and turns, LLM request/response shapes, chat policy
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
