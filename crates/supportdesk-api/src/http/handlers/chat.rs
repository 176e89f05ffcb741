//! Chat HTTP handlers.
//!
//! Endpoints:
//! - GET  /api/chat/history/{sessionId} - Turns of a session, oldest first
//! - POST /api/chat/message             - Send a message, receive the reply
//!
//! The response types are shared with the terminal client, which
//! deserializes them.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use supportdesk_core::chat::validate::normalize_session_id;
use supportdesk_types::chat::{ChatReply, Turn};
use supportdesk_types::error::ValidationError;

use crate::http::error::AppError;
use crate::state::AppState;

/// Message returned when the request body is not valid JSON.
pub const INVALID_BODY_MESSAGE: &str = "Invalid JSON body";

/// Request body for `POST /api/chat/message`.
///
/// `message` is kept as a raw JSON value so that a missing or
/// non-string message is reported like an empty one.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// `200` body of `POST /api/chat/message`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub status: bool,
    pub agent_response: ChatReply,
}

/// `200` body of `GET /api/chat/history/{sessionId}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub success: bool,
    pub chat_history: Vec<Turn>,
}

/// GET /api/chat/history/{sessionId}
///
/// Unknown sessions yield an empty history, not an error.
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, AppError> {
    let session_id =
        normalize_session_id(Some(&session_id)).ok_or(ValidationError::MissingSessionId)?;

    let turns = state.conversation.history(session_id).await?;

    Ok(Json(HistoryResponse {
        success: true,
        chat_history: turns,
    }))
}

/// GET /api/chat/history and /api/chat/history/ (no id in the path).
pub async fn missing_session_id() -> AppError {
    ValidationError::MissingSessionId.into()
}

/// POST /api/chat/message
pub async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(body) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected chat message body");
        AppError::BadRequest(INVALID_BODY_MESSAGE.to_string())
    })?;

    let message = match body.message {
        Some(serde_json::Value::String(text)) => text,
        _ => String::new(),
    };
    state.conversation.validate(&message)?;

    let reply = state
        .conversation
        .handle(&message, body.session_id.as_deref())
        .await?;

    Ok(Json(MessageResponse {
        status: true,
        agent_response: reply,
    }))
}
