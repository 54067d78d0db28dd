use async_trait::async_trait;
use reqwest::Client;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{BackendError, ChatBackend, ChatReply, Result};

/// Path appended to the endpoint for chat requests.
pub const DEFAULT_CHAT_PATH: &str = "/api/chat";

// Error bodies are logged, so keep them short.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Body returned by the backend's root route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Chat backend reached over HTTP with JSON bodies.
pub struct HttpBackend {
    client: Client,
    endpoint: String,
    chat_path: String,
}

impl HttpBackend {
    /// Creates a backend for `endpoint` using the default chat path and no timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Creates a backend on top of an already configured HTTP client.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            chat_path: DEFAULT_CHAT_PATH.to_string(),
        }
    }

    /// Replaces the chat sub-path.
    #[must_use]
    pub fn with_chat_path(mut self, chat_path: impl Into<String>) -> Self {
        self.chat_path = chat_path.into();
        self
    }

    /// Rebuilds the HTTP client so every request gives up after `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full URL that chat messages are posted to.
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.endpoint.trim_end_matches('/'), self.chat_path)
    }

    fn root_url(&self) -> String {
        format!("{}/", self.endpoint.trim_end_matches('/'))
    }

    /// Probes the backend's root route.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.root_url();
        debug!(%url, "probing backend health");

        let response = self.client.get(&url).send().await?;
        let body = read_success_body(response).await?;
        decode_object(&body)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send_message(&self, message: &str) -> Result<ChatReply> {
        let url = self.chat_url();
        debug!(%url, chars = message.chars().count(), "sending chat request");

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await?;

        let body = read_success_body(response).await?;
        let reply: ChatReply = decode_object(&body)?;
        debug!(has_text = reply.response.is_some(), "received chat reply");
        Ok(reply)
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<Vec<u8>> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BackendError::Status {
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    Ok(response.bytes().await?.to_vec())
}

/// Decodes a JSON body that must be an object; serde would otherwise map a
/// JSON array positionally onto the struct fields.
fn decode_object<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(BackendError::MalformedBody(serde_json::Error::custom(
            "expected a JSON object",
        )));
    }
    Ok(serde_json::from_value(value)?)
}

fn truncate_body(body: &str) -> String {
    let mut chars = body.chars();
    let mut truncated: String = chars.by_ref().take(MAX_ERROR_BODY_CHARS).collect();
    if chars.next().is_some() {
        truncated.push('…');
    }
    truncated
}
