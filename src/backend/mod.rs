//! Transport to the remote question-answering service.
//!
//! The session controller only sees the [`ChatBackend`] trait; [`HttpBackend`]
//! is the production implementation speaking JSON over HTTP.

mod error;
mod http;

use async_trait::async_trait;
use serde::Deserialize;

pub use error::{BackendError, FailureKind, Result};
pub use http::{DEFAULT_CHAT_PATH, HealthStatus, HttpBackend};

/// Decoded body of a successful chat response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    /// Reply text, if the backend produced one.
    #[serde(default)]
    pub response: Option<String>,
}

impl ChatReply {
    /// Creates a reply carrying the given text.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
        }
    }

    /// Returns the reply text, or `None` when it is absent or blank.
    pub fn into_text(self) -> Option<String> {
        self.response.filter(|text| !text.trim().is_empty())
    }
}

/// A service that answers one chat message at a time.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends `message` and waits for the backend's reply.
    async fn send_message(&self, message: &str) -> Result<ChatReply>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_text_present() {
        assert_eq!(
            ChatReply::new("Hi there").into_text(),
            Some("Hi there".to_string())
        );
    }

    #[test]
    fn test_reply_text_preserves_whitespace() {
        let reply = ChatReply::new("  line one\nline two  ");
        assert_eq!(
            reply.into_text(),
            Some("  line one\nline two  ".to_string())
        );
    }

    #[test]
    fn test_reply_text_missing_or_blank() {
        assert_eq!(ChatReply::default().into_text(), None);
        assert_eq!(ChatReply::new("").into_text(), None);
        assert_eq!(ChatReply::new(" \n ").into_text(), None);
    }

    #[test]
    fn test_reply_deserializes_without_response_field() {
        let reply: ChatReply = serde_json::from_str("{}").unwrap();
        assert!(reply.response.is_none());

        let reply: ChatReply =
            serde_json::from_str(r#"{"response": null, "extra": 1}"#).unwrap();
        assert!(reply.response.is_none());
    }
}
