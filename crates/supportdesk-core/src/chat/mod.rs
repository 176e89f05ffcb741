//! Chat session and turn handling.
//!
//! - `ChatRepository`: persistence port for sessions and turns
//! - `ConversationService`: the per-message orchestration
//! - `validate`: inbound message checks applied by the transport

pub mod repository;
pub mod service;
pub mod validate;
