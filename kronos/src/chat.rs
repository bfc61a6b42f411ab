//! Chat types and the provider trait for completion backends.
//!
//! This module provides:
//! - [`ChatRequest`]: prompt, model, temperature and streaming flag
//! - [`ChatResponse`]: the choices returned by the backend
//! - [`ChatProvider`]: core trait every completion backend implements
//!
//! # Example
//!
//! ```rust,ignore
//! use kronos::prelude::*;
//!
//! let request = ChatRequest::new("hermes")
//!     .prompt("Generate a simple recipe for banana bread")
//!     .temperature(0.7);
//!
//! let response = provider.chat(&request).await?;
//! println!("{}", response.text().unwrap_or_default());
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{LlmError, Result};

/// A single-prompt chat completion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Prompt text sent to the model.
    #[serde(default)]
    pub prompt: String,

    /// Model identifier (e.g., "hermes"). Empty means the provider default.
    #[serde(default)]
    pub model: String,

    /// Sampling temperature (0.0 to 2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Whether to stream the response.
    #[serde(default)]
    pub stream: bool,
}

impl ChatRequest {
    /// Creates a new request with the specified model.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Sets the prompt.
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the streaming flag.
    #[must_use]
    pub const fn stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }
}

/// Token usage statistics reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt.
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Tokens in the completion.
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens.
    #[serde(default)]
    pub total_tokens: u32,
}

/// Message carried by a [`Choice`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    /// Author role, usually "assistant".
    #[serde(default)]
    pub role: String,
    /// Generated text.
    #[serde(default)]
    pub content: Option<String>,
}

/// One generated alternative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Position of this choice in the response.
    #[serde(default)]
    pub index: usize,
    /// The generated message.
    pub message: ChoiceMessage,
    /// Why the model stopped generating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// A chat completion response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated alternatives; the first one is the answer.
    pub choices: Vec<Choice>,

    /// Unique completion ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Model identifier used for this response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Token usage statistics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// Creates a response with a single assistant choice.
    #[must_use]
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            choices: vec![Choice {
                index: 0,
                message: ChoiceMessage {
                    role: "assistant".to_owned(),
                    content: Some(content.into()),
                },
                finish_reason: Some("stop".to_owned()),
            }],
            ..Default::default()
        }
    }

    /// Returns the first choice's message content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }

    /// Consumes the response and returns the first choice's content.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ResponseFormat`] when there are no choices or the
    /// first choice carries no content.
    pub fn into_text(self) -> Result<String> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::response_format("at least one choice", "empty choices"))?;

        choice
            .message
            .content
            .ok_or_else(|| LlmError::response_format("message content", "null content").into())
    }
}

/// Core trait for completion backends.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a chat completion request and receive a complete response.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Get the name of this provider.
    ///
    /// Used for error messages and logging.
    fn provider_name(&self) -> &'static str;
}

/// Type alias for an Arc-wrapped `ChatProvider`.
pub type SharedChatProvider = std::sync::Arc<dyn ChatProvider>;

#[async_trait]
impl<T: ChatProvider + ?Sized> ChatProvider for std::sync::Arc<T> {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        (**self).chat(request).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    mod chat_request {
        use super::*;

        #[test]
        fn new_creates_with_model() {
            let req = ChatRequest::new("hermes");
            assert_eq!(req.model, "hermes");
            assert!(req.prompt.is_empty());
            assert!(req.temperature.is_none());
            assert!(!req.stream);
        }

        #[test]
        fn builder_sets_fields() {
            let req = ChatRequest::new("hermes")
                .prompt("hello")
                .temperature(0.7)
                .stream(true);

            assert_eq!(req.prompt, "hello");
            assert_eq!(req.temperature, Some(0.7));
            assert!(req.stream);
        }
    }

    mod chat_response {
        use super::*;

        #[test]
        fn text_reads_first_choice() {
            let resp = ChatResponse::from_text("Mix bananas and flour.");
            assert_eq!(resp.text(), Some("Mix bananas and flour."));
        }

        #[test]
        fn into_text_rejects_empty_choices() {
            let err = ChatResponse::default().into_text().unwrap_err();
            assert!(err.to_string().contains("empty choices"));
        }

        #[test]
        fn into_text_rejects_null_content() {
            let mut resp = ChatResponse::from_text("x");
            resp.choices[0].message.content = None;
            assert!(resp.into_text().is_err());
        }

        #[test]
        fn deserializes_minimal_payload() {
            let json = r#"{"choices":[{"message":{"content":"hi"}}]}"#;
            let resp: ChatResponse = serde_json::from_str(json).unwrap();
            assert_eq!(resp.text(), Some("hi"));
            assert!(resp.usage.is_none());
        }
    }
}
