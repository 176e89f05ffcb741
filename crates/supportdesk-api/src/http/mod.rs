//! HTTP layer for supportdesk.
//!
//! Axum server exposing the chat endpoints under `/api/chat` and a
//! liveness probe at `/health`, with permissive CORS.

pub mod error;
pub mod handlers;
pub mod router;
