//! One-shot completion runner.
//!
//! [`Runner`] sends a single non-streaming request and turns whatever
//! happens, including a failure to build the client, into an [`Outcome`].
//! No error escapes and nothing is retried.

use tracing::{debug, warn};

use crate::chat::{ChatProvider, ChatRequest, ChatResponse};
use crate::error::Result;
use crate::outcome::Outcome;

/// Runs a single chat completion and reports an [`Outcome`].
#[derive(Debug, Clone, PartialEq)]
pub struct Runner {
    request: ChatRequest,
}

impl Runner {
    /// Prompt used when none is configured.
    pub const DEFAULT_PROMPT: &'static str = "Generate a simple recipe for banana bread";
    /// Model used when none is configured.
    pub const DEFAULT_MODEL: &'static str = "hermes";
    /// Sampling temperature used when none is configured.
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Creates a runner for the given request. Streaming is always disabled.
    #[must_use]
    pub fn new(request: ChatRequest) -> Self {
        Self {
            request: request.stream(false),
        }
    }

    /// The request this runner sends.
    #[must_use]
    pub const fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// Sends the request through `provider`.
    pub async fn run<P: ChatProvider + ?Sized>(&self, provider: &P) -> Outcome {
        debug!(
            provider = provider.provider_name(),
            model = %self.request.model,
            "running chat completion"
        );

        let result = provider
            .chat(&self.request)
            .await
            .and_then(ChatResponse::into_text);

        if let Err(err) = &result {
            warn!(error = %err, "chat completion failed");
        }

        Outcome::from_result(result)
    }

    /// Builds the client with `connect`, then sends the request.
    ///
    /// A construction error is reported like any other failure.
    pub async fn run_with<P, F>(&self, connect: F) -> Outcome
    where
        P: ChatProvider,
        F: FnOnce() -> Result<P>,
    {
        match connect() {
            Ok(provider) => self.run(&provider).await,
            Err(err) => {
                warn!(error = %err, "failed to construct completion client");
                Outcome::failure(err.to_string())
            }
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(
            ChatRequest::new(Self::DEFAULT_MODEL)
                .prompt(Self::DEFAULT_PROMPT)
                .temperature(Self::DEFAULT_TEMPERATURE),
        )
    }
}
