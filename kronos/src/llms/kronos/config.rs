//! Kronos client configuration.

use crate::error::{LlmError, Result};

/// Configuration for the Kronos client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KronosConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Base URL for the API (defaults to the Kronos Labs API).
    pub base_url: String,
    /// Default model to use.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl KronosConfig {
    /// Default Kronos Labs API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.kronoslabs.ai/v1";
    /// Default model.
    pub const DEFAULT_MODEL: &'static str = "hermes";
    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    /// Environment variable holding the API key.
    pub const ENV_API_KEY: &'static str = "KRONOS_API_KEY";
    /// Environment variable overriding the base URL.
    pub const ENV_BASE_URL: &'static str = "KRONOS_BASE_URL";
    /// Environment variable overriding the default model.
    pub const ENV_MODEL: &'static str = "KRONOS_MODEL";

    /// Creates a new configuration with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// Reads from:
    /// - `KRONOS_API_KEY` - Required API key
    /// - `KRONOS_BASE_URL` - Optional base URL
    /// - `KRONOS_MODEL` - Optional default model
    ///
    /// # Errors
    ///
    /// Returns an authentication error when `KRONOS_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an authentication error when no API key is found.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(Self::ENV_API_KEY).ok_or_else(|| {
            LlmError::auth("kronos", "KRONOS_API_KEY environment variable not set")
        })?;

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup(Self::ENV_BASE_URL) {
            config = config.with_base_url(base_url);
        }
        if let Some(model) = lookup(Self::ENV_MODEL) {
            config = config.with_model(model);
        }

        Ok(config)
    }

    /// Sets the base URL. A trailing slash is dropped.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_owned();
        self
    }

    /// Sets the default model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Disables the client-side request timeout.
    #[must_use]
    pub const fn without_timeout(mut self) -> Self {
        self.timeout_secs = None;
        self
    }
}

impl Default for KronosConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            model: Self::DEFAULT_MODEL.to_owned(),
            timeout_secs: Some(Self::DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_config_new() {
        let config = KronosConfig::new("test-key");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, KronosConfig::DEFAULT_BASE_URL);
        assert_eq!(config.model, "hermes");
        assert_eq!(config.timeout_secs, Some(120));
    }

    #[test]
    fn test_config_builder() {
        let config = KronosConfig::new("key")
            .with_model("hermes-large")
            .with_base_url("http://localhost:8080/v1/")
            .with_timeout(60);

        assert_eq!(config.model, "hermes-large");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.timeout_secs, Some(60));
        assert_eq!(config.without_timeout().timeout_secs, None);
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let vars = HashMap::from([
            ("KRONOS_API_KEY", "secret"),
            ("KRONOS_BASE_URL", "http://127.0.0.1:9000"),
            ("KRONOS_MODEL", "hermes-mini"),
        ]);
        let config =
            KronosConfig::from_lookup(|k| vars.get(k).map(|v| (*v).to_owned())).expect("config");

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.model, "hermes-mini");
    }

    #[test]
    fn test_from_lookup_requires_key() {
        let err = KronosConfig::from_lookup(|_| None).expect_err("missing key");
        assert!(err.to_string().contains("KRONOS_API_KEY"));
    }
}
