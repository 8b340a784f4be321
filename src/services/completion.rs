// src/services/completion.rs
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Sampling parameters sent with a completion call.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Classified failures of the completion provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connection failure or upstream 5xx
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Provider request timed out: {0}")]
    Timeout(String),

    /// Upstream 429, usually quota exhaustion
    #[error("Provider rate limit exceeded: {message}")]
    RateLimited {
        message: String,
        retry_after: Option<Duration>,
    },

    /// Upstream refused the request (bad key, unknown model, ...)
    #[error("Provider rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl ProviderError {
    /// Short label used when logging a failed relay.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Unavailable(_) => "unavailable",
            ProviderError::Timeout(_) => "timeout",
            ProviderError::RateLimited { .. } => "rate_limited",
            ProviderError::Rejected { .. } => "rejected",
            ProviderError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// An external text-completion service.
///
/// Implementations hold no per-request state and are shared across all
/// requests behind an `Arc`.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Submits the conversation and returns the first choice's text.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        settings: &CompletionSettings,
    ) -> ProviderResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let value = serde_json::to_value(ChatMessage::system("be brief")).unwrap();
        assert_eq!(value["role"], "system");
        assert_eq!(value["content"], "be brief");

        let value = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert_eq!(value["role"], "user");
    }

    #[test]
    fn error_messages_carry_context() {
        let err = ProviderError::Rejected { status: 401, message: "Invalid API Key".into() };
        assert_eq!(err.to_string(), "Provider rejected request (401): Invalid API Key");
        assert_eq!(err.kind(), "rejected");
    }
}
