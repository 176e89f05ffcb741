//! Liveness endpoint.

/// Plain-text body of `GET /health`.
pub const HEALTH_MESSAGE: &str = "AI Support Agent API is running";

/// GET /health - plain-text liveness check.
pub async fn health_check() -> &'static str {
    HEALTH_MESSAGE
}
