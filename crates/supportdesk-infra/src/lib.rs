//! Infrastructure layer for supportdesk.
//!
//! Contains implementations of the ports defined in `supportdesk-core`:
//! SQLite session storage, Gemini and Anthropic HTTP clients, and the
//! configuration loader for the data directory and environment.

pub mod config;
pub mod llm;
pub mod sqlite;
