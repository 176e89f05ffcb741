//! Anthropic Claude provider over the Messages API.
//!
//! Non-streaming only: one request, one complete reply.

pub mod client;
pub mod types;

pub use client::AnthropicProvider;
