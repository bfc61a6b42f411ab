//! Configuration management for the `kronos` command.
//!
//! Settings are resolved in this order, later sources winning:
//! 1. Default values
//! 2. Config file (`~/.kronos/config.toml`, or `--config`)
//! 3. Environment variables and command-line flags

mod schema;

pub use schema::{CliConfig, ConfigIssue, IssueLevel, Overrides, ProviderConfig, RequestDefaults};

use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    /// Refusing to replace an existing file.
    #[error("config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    /// Validation found errors.
    #[error("configuration has {0} issue(s)")]
    Invalid(usize),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Get the default config directory path.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".kronos")
}

/// Get the default config file path.
#[must_use]
pub fn config_path() -> PathBuf {
    default_config_dir().join("config.toml")
}

/// Load configuration from a specific path.
///
/// A missing file yields the defaults.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub async fn load_config_from(path: &Path) -> ConfigResult<CliConfig> {
    if !tokio::fs::try_exists(path).await? {
        debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(CliConfig::default());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: CliConfig = toml::from_str(&content)?;
    debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Save configuration to a specific path.
///
/// # Errors
///
/// Fails on serialization or IO errors.
pub async fn save_config_to(config: &CliConfig, path: &Path) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let content = toml::to_string_pretty(config)?;
    tokio::fs::write(path, content).await?;
    info!(path = %path.display(), "saved config file");

    Ok(())
}

/// Write a default configuration file at `path`.
///
/// An existing file is kept unless `force` is set.
///
/// # Errors
///
/// Returns [`ConfigError::AlreadyExists`] when the file exists and `force`
/// is not set.
pub async fn init_config_at(path: &Path, force: bool) -> ConfigResult<CliConfig> {
    if !force && tokio::fs::try_exists(path).await? {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }

    let config = CliConfig::default();
    save_config_to(&config, path).await?;
    info!("created default config at {}", path.display());

    Ok(config)
}
