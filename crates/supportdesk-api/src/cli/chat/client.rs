//! HTTP client for the supportdesk API, used by the terminal widget.

use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::{Response, Url};
use serde::Deserialize;

use supportdesk_types::chat::{ChatReply, Turn};

use crate::http::handlers::chat::{HistoryResponse, MessageResponse, SendMessageRequest};

/// Client-side request timeout. Longer than the server's LLM timeout so a
/// slow model still yields the server's fallback reply.
const CLIENT_TIMEOUT: Duration = Duration::from_secs(90);

/// The server refused a request (4xx) and said why.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct Rejected(pub String);

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to one supportdesk server.
pub struct SupportClient {
    http: reqwest::Client,
    base_url: String,
}

impl SupportClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(CLIENT_TIMEOUT)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Server URL with `segments` appended, each percent-encoded.
    fn url(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid server URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("server URL cannot take a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetch a session's turns, oldest first.
    pub async fn history(&self, session_id: &str) -> anyhow::Result<Vec<Turn>> {
        let url = self.url(&["api", "chat", "history", session_id])?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("history request failed")?;

        let response = check_status(response, "history").await?;
        let body: HistoryResponse = response
            .json()
            .await
            .context("invalid history response")?;
        Ok(body.chat_history)
    }

    /// Send one message and return the agent's reply.
    ///
    /// A refusal by the server comes back as a [`Rejected`] error carrying
    /// the server's own message.
    pub async fn send(&self, message: &str, session_id: Option<&str>) -> anyhow::Result<ChatReply> {
        let request = SendMessageRequest {
            message: Some(serde_json::Value::String(message.to_string())),
            session_id: session_id.map(str::to_string),
        };

        let response = self
            .http
            .post(self.url(&["api", "chat", "message"])?)
            .json(&request)
            .send()
            .await
            .context("message request failed")?;

        let response = check_status(response, "message").await?;
        let body: MessageResponse = response
            .json()
            .await
            .context("invalid message response")?;
        Ok(body.agent_response)
    }
}

/// Pass successful responses through; turn 4xx into [`Rejected`].
async fn check_status(response: Response, what: &str) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status.is_client_error() {
        let reason = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("HTTP {status}"),
        };
        return Err(Rejected(reason).into());
    }
    bail!("{what} request returned HTTP {status}")
}
