//! Kronos `ChatProvider` implementation.

use async_trait::async_trait;
use tracing::debug;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse};
use crate::error::{LlmError, Result};

use super::client::Kronos;
use super::types::KronosChatResponse;

#[async_trait]
impl ChatProvider for Kronos {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        if request.stream {
            return Err(LlmError::not_supported("streaming chat completions").into());
        }

        let url = self.chat_url();
        let body = self.build_body(request);
        debug!(%url, model = %body.model, "sending chat completion");

        let response = self.build_request(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "chat completion failed");
            return Err(Self::parse_error(status.as_u16(), &error_text).into());
        }

        let response_text = response.text().await?;
        let parsed: KronosChatResponse = serde_json::from_str(&response_text).map_err(|e| {
            LlmError::response_format(
                "valid Kronos response",
                format!("parse error: {e}, response: {response_text}"),
            )
        })?;

        debug!(choices = parsed.choices.len(), "chat completion received");
        Ok(parsed.into())
    }

    fn provider_name(&self) -> &'static str {
        Self::PROVIDER
    }
}
