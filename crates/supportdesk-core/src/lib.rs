//! Business logic and repository trait definitions for supportdesk.
//!
//! This crate defines the "ports" (repository and LLM provider traits) that
//! the infrastructure layer implements, plus the conversation service and
//! reply generator built on top of them. It depends only on
//! `supportdesk-types` -- never on `supportdesk-infra` or any database/IO crate.

pub mod chat;
pub mod llm;
pub mod reply;

#[cfg(test)]
pub(crate) mod testing;
