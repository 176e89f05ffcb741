//! Google Gemini / Gemma provider over the `generateContent` REST API.

pub mod client;
pub mod types;

pub use client::GeminiProvider;
