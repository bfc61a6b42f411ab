//! Error types for the `kronos` command.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Result type alias for command operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors raised outside the single completion request.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration could not be loaded or written.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The inventory file could not be read.
    #[error("failed to read inventory {}: {source}", path.display())]
    Inventory {
        /// Inventory file path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The inventory file is not a JSON array of items.
    #[error("invalid inventory: {0}")]
    InvalidInventory(#[from] serde_json::Error),

    /// Library error.
    #[error(transparent)]
    Kronos(#[from] kronos::Error),
}

impl CliError {
    /// Create an inventory read error.
    #[must_use]
    pub fn inventory(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Inventory {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_error_names_path() {
        let err = CliError::inventory(
            "pantry.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "failed to read inventory pantry.json: missing");
    }

    #[test]
    fn config_error_is_transparent() {
        let err: CliError = ConfigError::AlreadyExists(PathBuf::from("c.toml")).into();
        assert_eq!(err.to_string(), "config file already exists: c.toml");
    }
}
