//! Kronos Labs API request and response types.
//!
//! These map directly onto the `/chat/completions` wire format and are
//! internal to the client.

use serde::{Deserialize, Serialize};

use crate::chat::{ChatResponse, Choice, ChoiceMessage, Usage};

/// Kronos chat completion request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KronosChatRequest {
    pub prompt: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    pub is_stream: bool,
}

/// Kronos chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct KronosChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub choices: Vec<KronosChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Kronos response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct KronosChoice {
    #[serde(default)]
    pub index: usize,
    pub message: KronosMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Kronos response message.
#[derive(Debug, Clone, Deserialize)]
pub struct KronosMessage {
    #[serde(default = "assistant_role")]
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

fn assistant_role() -> String {
    "assistant".to_owned()
}

impl From<KronosChatResponse> for ChatResponse {
    fn from(response: KronosChatResponse) -> Self {
        let choices = response
            .choices
            .into_iter()
            .map(|choice| Choice {
                index: choice.index,
                message: ChoiceMessage {
                    role: choice.message.role,
                    content: choice.message.content,
                },
                finish_reason: choice.finish_reason,
            })
            .collect();

        Self {
            choices,
            id: response.id,
            model: response.model,
            usage: response.usage,
        }
    }
}

/// Error payloads seen from the API and the gateways in front of it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KronosErrorResponse {
    /// `{"error": {"message": "...", "type": "...", "code": "..."}}`
    Nested { error: KronosErrorDetail },
    /// `{"error": "..."}`
    Flat { error: String },
    /// `{"detail": "..."}`
    Detail { detail: String },
    /// `{"message": "..."}`
    Message { message: String },
}

/// Nested error details.
#[derive(Debug, Clone, Deserialize)]
pub struct KronosErrorDetail {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl KronosErrorResponse {
    /// Splits the payload into its message and optional code.
    pub fn into_parts(self) -> (String, Option<String>) {
        match self {
            Self::Nested { error } => {
                let code = error.code.or(error.error_type);
                (error.message, code)
            }
            Self::Flat { error: message }
            | Self::Detail { detail: message }
            | Self::Message { message } => (message, None),
        }
    }
}
