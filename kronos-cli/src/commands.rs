//! Command implementations shared by the binary and its tests.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use kronos::prelude::*;

use crate::config::{CliConfig, Overrides, load_config_from};
use crate::error::{CliError, Result};

/// Sends the configured prompt once and reports the outcome.
///
/// Client construction failures become a failure outcome.
pub async fn ask(config: &CliConfig, overrides: &Overrides) -> Outcome {
    let runner = Runner::new(config.request(overrides));
    let client_config = config.client_config(overrides);

    info!(
        base_url = %client_config.base_url,
        model = %runner.request().model,
        "sending completion request"
    );
    runner.run_with(|| Kronos::new(client_config)).await
}

/// Loads the configuration at `config_file`, then runs [`ask`].
///
/// An unreadable or malformed file is reported as a failure outcome.
pub async fn ask_with_config(config_file: &Path, overrides: &Overrides) -> Outcome {
    match load_config_from(config_file).await {
        Ok(config) => ask(&config, overrides).await,
        Err(err) => {
            warn!(path = %config_file.display(), error = %err, "failed to load config");
            Outcome::failure(err.to_string())
        }
    }
}

/// Successful `kronos recipes` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeReport {
    /// Always `true`; failures are reported as an [`Outcome`].
    pub success: bool,
    /// Generated or fallback recipes.
    pub recipes: Vec<Recipe>,
}

impl RecipeReport {
    /// Renders the report as a single JSON line.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn to_json_line(&self) -> kronos::Result<String> {
        to_line(self)
    }
}

/// Reads a JSON array of food items.
///
/// # Errors
///
/// Fails when the file cannot be read or is not a JSON array of items.
pub async fn read_inventory(path: &Path) -> Result<Vec<FoodItem>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CliError::inventory(path, e))?;
    let items: Vec<FoodItem> = serde_json::from_str(&content)?;
    debug!(path = %path.display(), items = items.len(), "loaded inventory");
    Ok(items)
}

/// Generates recipes for the inventory at `inventory`.
///
/// Without a usable client the built-in fallback recipes are returned.
///
/// # Errors
///
/// Fails only when the inventory cannot be read or parsed.
pub async fn recipes(
    config: &CliConfig,
    overrides: &Overrides,
    inventory: &Path,
) -> Result<RecipeReport> {
    let items = read_inventory(inventory).await?;

    let model = overrides
        .model
        .clone()
        .unwrap_or_else(|| config.defaults.model.clone());
    let temperature = overrides.temperature.unwrap_or(config.defaults.temperature);

    let recipes = match Kronos::new(config.client_config(overrides)) {
        Ok(client) => {
            RecipeGenerator::new(client)
                .with_model(model)
                .with_temperature(temperature)
                .generate(&items)
                .await
        }
        Err(err) => {
            info!(error = %err, "no completion client, using fallback recipes");
            RecipeGenerator::<Kronos>::disconnected().generate(&items).await
        }
    };

    Ok(RecipeReport {
        success: true,
        recipes,
    })
}

/// Loads the configuration at `config_file`, then runs [`recipes`].
///
/// # Errors
///
/// Fails when the configuration or the inventory cannot be read or parsed.
pub async fn recipes_with_config(
    config_file: &Path,
    overrides: &Overrides,
    inventory: &Path,
) -> Result<RecipeReport> {
    let config = load_config_from(config_file).await?;
    recipes(&config, overrides, inventory).await
}

/// Renders a recipes result as the single output line.
///
/// Errors become the failure outcome line.
///
/// # Errors
///
/// Fails only if serialization fails.
pub fn recipes_line(result: Result<RecipeReport>) -> kronos::Result<String> {
    match result {
        Ok(report) => report.to_json_line(),
        Err(err) => {
            warn!(error = %err, "recipe generation aborted");
            Outcome::failure(err.to_string()).to_json_line()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    use super::*;

    #[tokio::test]
    async fn ask_without_key_reports_failure() {
        let outcome = ask(&CliConfig::default(), &Overrides::default()).await;
        assert_eq!(outcome, Outcome::failure("API key is required"));
    }

    #[tokio::test]
    async fn inventory_must_be_an_array() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("inventory.json");
        file.write_str(r#"{"name": "Apple"}"#).unwrap();

        let err = read_inventory(file.path()).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidInventory(_)));
    }

    #[tokio::test]
    async fn recipes_without_key_fall_back() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("inventory.json");
        file.write_str(r#"[{"name": "Bread", "quantity": 1, "unit": "loaf"}]"#)
            .unwrap();

        let report = recipes(&CliConfig::default(), &Overrides::default(), file.path())
            .await
            .unwrap();
        assert!(report.success);
        assert_eq!(report.recipes[0].title, "Classic Sandwich");
        assert!(report.to_json_line().unwrap().starts_with(r#"{"success": true, "recipes": ["#));
    }

    #[tokio::test]
    async fn broken_config_is_failure_outcome() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("config.toml");
        file.write_str("[provider\n").unwrap();

        let line = ask_with_config(file.path(), &Overrides::default())
            .await
            .to_json_line()
            .unwrap();
        assert!(line.starts_with(r#"{"success": false, "error": "TOML parse error: "#));
        assert_eq!(line.lines().count(), 1);

        let inventory = dir.child("inventory.json");
        inventory.write_str("[]").unwrap();
        let result = recipes_with_config(file.path(), &Overrides::default(), inventory.path()).await;
        let line = recipes_line(result).unwrap();
        assert!(line.starts_with(r#"{"success": false, "error": "TOML parse error: "#));
        assert_eq!(line.lines().count(), 1);
    }

    #[tokio::test]
    async fn missing_config_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let outcome = ask_with_config(&dir.path().join("absent.toml"), &Overrides::default()).await;
        assert_eq!(outcome, Outcome::failure("API key is required"));
    }

    #[test]
    fn recipes_line_reports_errors_as_outcome() {
        let err = CliError::inventory(
            "pantry.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(
            recipes_line(Err(err)).unwrap(),
            r#"{"success": false, "error": "failed to read inventory pantry.json: missing"}"#
        );
    }

    #[tokio::test]
    async fn missing_inventory_is_error() {
        let dir = TempDir::new().unwrap();
        let err = recipes(
            &CliConfig::default(),
            &Overrides::default(),
            &dir.path().join("absent.json"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::Inventory { .. }));
    }
}
