//! Configuration Module - TOML-based Application Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! Every section is optional; missing values fall back to the
//! defaults below.

pub mod loader;

use serde::Deserialize;

use crate::domain::validation::DEFAULT_MIN_PASSWORD_LEN;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Application identity and log level.
  #[serde(default)]
  pub app: AppSection,
  /// Log output format.
  #[serde(default)]
  pub logging: LoggingConfig,
  /// Persistence backend.
  #[serde(default)]
  pub storage: StorageConfig,
  /// Form validation rules.
  #[serde(default)]
  pub validation: ValidationConfig,
}

/// Application identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
  /// Human-readable application name.
  #[serde(default = "default_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

impl Default for AppSection {
  fn default() -> Self {
    Self {
      name: default_name(),
      log_level: default_log_level(),
    }
  }
}

/// Log output configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
  /// Emit JSON lines instead of human-readable output.
  #[serde(default)]
  pub json: bool,
}

/// Which key-value substrate backs the stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
  /// One JSON file per key under `data_dir`.
  #[default]
  File,
  /// Process memory only; nothing survives exit.
  Memory,
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
  #[serde(default)]
  pub backend: StorageBackend,
  /// Directory for the file backend.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self {
      backend: StorageBackend::default(),
      data_dir: default_data_dir(),
    }
  }
}

/// Form validation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
  /// Minimum password length accepted at signup.
  #[serde(default = "default_min_password_len")]
  pub min_password_len: usize,
}

impl Default for ValidationConfig {
  fn default() -> Self {
    Self {
      min_password_len: default_min_password_len(),
    }
  }
}

// Default value functions for serde

fn default_name() -> String {
  "trade-journal".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_data_dir() -> String {
  "data".to_string()
}

fn default_min_password_len() -> usize {
  DEFAULT_MIN_PASSWORD_LEN
}
