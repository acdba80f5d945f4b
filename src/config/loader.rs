//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::{AppConfig, StorageBackend};

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    backend = ?config.storage.backend,
    data_dir = %config.storage.data_dir,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).with_context(|| "Failed to parse config.toml")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.app.name.trim().is_empty(),
    "app.name must not be empty"
  );

  if config.storage.backend == StorageBackend::File {
    anyhow::ensure!(
      !config.storage.data_dir.trim().is_empty(),
      "storage.data_dir must not be empty for the file backend"
    );
  }

  anyhow::ensure!(
    config.validation.min_password_len >= 1,
    "validation.min_password_len must be at least 1, got {}",
    config.validation.min_password_len
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_empty_config_uses_defaults() {
    let config = parse_config("").unwrap();
    assert_eq!(config.app.log_level, "info");
    assert_eq!(config.storage.backend, StorageBackend::File);
    assert_eq!(config.storage.data_dir, "data");
    assert_eq!(config.validation.min_password_len, 6);
    assert!(!config.logging.json);
  }

  #[test]
  fn test_full_config() {
    let config = parse_config(
      r#"
        [app]
        name = "desk"
        log_level = "debug"

        [logging]
        json = true

        [storage]
        backend = "memory"

        [validation]
        min_password_len = 10
      "#,
    )
    .unwrap();
    assert_eq!(config.app.name, "desk");
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.validation.min_password_len, 10);
    assert!(config.logging.json);
  }

  #[test]
  fn test_rejects_invalid_values() {
    assert!(parse_config("[validation]\nmin_password_len = 0").is_err());
    assert!(parse_config("[storage]\ndata_dir = \"\"").is_err());
    assert!(parse_config("[storage]\nbackend = \"redis\"").is_err());
  }
}
