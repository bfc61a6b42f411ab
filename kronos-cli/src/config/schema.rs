//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use kronos::chat::ChatRequest;
use kronos::llms::KronosConfig;
use kronos::runner::Runner;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Kronos API connection settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Request defaults.
    #[serde(default)]
    pub defaults: RequestDefaults,
}

/// Kronos API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key. `KRONOS_API_KEY` or `--api-key` take precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL of the API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds; 0 disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    KronosConfig::DEFAULT_BASE_URL.to_owned()
}

const fn default_timeout_secs() -> u64 {
    KronosConfig::DEFAULT_TIMEOUT_SECS
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Request defaults used when no flag overrides them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDefaults {
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Prompt sent by `kronos ask`.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_model() -> String {
    Runner::DEFAULT_MODEL.to_owned()
}

const fn default_temperature() -> f32 {
    Runner::DEFAULT_TEMPERATURE
}

fn default_prompt() -> String {
    Runner::DEFAULT_PROMPT.to_owned()
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            prompt: default_prompt(),
        }
    }
}

/// Values given on the command line or through the environment.
///
/// Each `Some` wins over the file configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    /// API key.
    pub api_key: Option<String>,
    /// Base URL.
    pub base_url: Option<String>,
    /// Model identifier.
    pub model: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Prompt text.
    pub prompt: Option<String>,
}

impl CliConfig {
    /// Builds the client configuration.
    ///
    /// A missing API key is left empty; client construction reports it.
    #[must_use]
    pub fn client_config(&self, overrides: &Overrides) -> KronosConfig {
        let api_key = overrides
            .api_key
            .clone()
            .or_else(|| self.provider.api_key.clone())
            .unwrap_or_default();
        let base_url = overrides
            .base_url
            .clone()
            .unwrap_or_else(|| self.provider.base_url.clone());
        let model = overrides
            .model
            .clone()
            .unwrap_or_else(|| self.defaults.model.clone());

        let config = KronosConfig::new(api_key)
            .with_base_url(base_url)
            .with_model(model);

        match self.provider.timeout_secs {
            0 => config.without_timeout(),
            secs => config.with_timeout(secs),
        }
    }

    /// Builds the request sent by `kronos ask`.
    #[must_use]
    pub fn request(&self, overrides: &Overrides) -> ChatRequest {
        let model = overrides
            .model
            .clone()
            .unwrap_or_else(|| self.defaults.model.clone());
        let prompt = overrides
            .prompt
            .clone()
            .unwrap_or_else(|| self.defaults.prompt.clone());
        let temperature = overrides
            .temperature
            .unwrap_or(self.defaults.temperature);

        ChatRequest::new(model)
            .prompt(prompt)
            .temperature(temperature)
    }

    /// Validate the configuration and return any issues found.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.provider.api_key.as_deref().is_some_and(str::is_empty) {
            issues.push(ConfigIssue::warning(
                "provider.api_key",
                "API key is empty. Set KRONOS_API_KEY or remove the entry.",
            ));
        }

        if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            issues.push(ConfigIssue::error(
                "provider.base_url",
                "Base URL must start with http:// or https://",
            ));
        }

        if self.defaults.model.trim().is_empty() {
            issues.push(ConfigIssue::error("defaults.model", "Model must not be empty"));
        }

        if !(0.0..=2.0).contains(&self.defaults.temperature) {
            issues.push(ConfigIssue::warning(
                "defaults.temperature",
                "Temperature is usually between 0.0 and 2.0",
            ));
        }

        if self.provider.timeout_secs == 0 {
            issues.push(ConfigIssue::warning(
                "provider.timeout_secs",
                "Timeout is 0, requests will never time out",
            ));
        }

        issues
    }
}

/// Configuration validation issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Issue severity level.
    pub level: IssueLevel,
    /// Configuration path (e.g., "provider.base_url").
    pub path: String,
    /// Human-readable message.
    pub message: String,
}

impl ConfigIssue {
    /// Create an error-level issue.
    #[must_use]
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a warning-level issue.
    #[must_use]
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.level {
            IssueLevel::Error => "ERROR",
            IssueLevel::Warning => "WARN",
        };
        write!(f, "[{}] {}: {}", prefix, self.path, self.message)
    }
}

/// Severity level for configuration issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueLevel {
    /// Error that prevents requests from succeeding.
    Error,
    /// Warning about potential issues.
    Warning,
}
