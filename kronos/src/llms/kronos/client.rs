//! Kronos Labs API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::chat::ChatRequest;
use crate::error::{LlmError, Result};

use super::config::KronosConfig;
use super::types::{KronosChatRequest, KronosErrorResponse};

/// Kronos Labs API client.
#[derive(Debug, Clone)]
pub struct Kronos {
    pub(crate) config: Arc<KronosConfig>,
    pub(crate) client: Client,
}

impl Kronos {
    /// Provider name used in errors and logs.
    pub const PROVIDER: &'static str = "kronos";

    /// Create a new Kronos client with the given configuration.
    ///
    /// # Errors
    ///
    /// Fails when the API key is empty or the HTTP client cannot be built.
    pub fn new(config: KronosConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::auth(Self::PROVIDER, "API key is required").into());
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let client = builder
            .build()
            .map_err(|e| LlmError::internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    /// Create a client bound to the given API key with default settings.
    ///
    /// # Errors
    ///
    /// See [`Kronos::new`].
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::new(KronosConfig::new(api_key))
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Fails when `KRONOS_API_KEY` is unset or empty.
    pub fn from_env() -> Result<Self> {
        let config = KronosConfig::from_env()?;
        Self::new(config)
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the default model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the chat completions URL.
    pub(crate) fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Build a JSON POST request with authentication headers.
    pub(crate) fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
    }

    /// Build the request body.
    pub(crate) fn build_body(&self, request: &ChatRequest) -> KronosChatRequest {
        let model = if request.model.is_empty() {
            self.config.model.clone()
        } else {
            request.model.clone()
        };

        KronosChatRequest {
            prompt: request.prompt.clone(),
            model,
            temperature: request.temperature,
            is_stream: request.stream,
        }
    }

    /// Parse an error response from the API.
    pub(crate) fn parse_error(status: u16, body: &str) -> LlmError {
        let Ok(payload) = serde_json::from_str::<KronosErrorResponse>(body) else {
            return LlmError::http_status(status, body.to_owned());
        };

        let (message, code) = payload.into_parts();
        match (status, code) {
            (401 | 403, _) => LlmError::auth(Self::PROVIDER, message),
            (429, _) => LlmError::rate_limited(Self::PROVIDER, message),
            (_, Some(code)) => LlmError::provider_code(Self::PROVIDER, code, message),
            (_, None) => LlmError::provider(Self::PROVIDER, message),
        }
    }
}
